//! Generation session.
//!
//! One session runs one generation request end to end: walk the roots,
//! abort with every collected diagnostic if anything is unsupported, then
//! plan and emit a codec per registered type. The session owns its
//! registry; nothing survives it except the [`GeneratedUnit`].

use std::collections::BTreeMap;

use tessel_diagnostic::{DiagnosticConfig, DiagnosticQueue, GenerationFailed};
use tessel_ir::{LoadedSchema, TypeGraph, TypeId};
use tessel_runtime::{CodecPlan, CodecTable, DEFAULT_TAG_MEMBER};

use crate::classify::TypeClassifier;
use crate::emit::{Emitter, GeneratedSource};
use crate::plan::PlanBuilder;
use crate::registry::GenerationRegistry;
use crate::walk::Walker;

/// Generator settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Member carrying the concrete type of a polymorphic value.
    pub tag_member: String,
    /// Appended to the mangled type name to form a codec's identity.
    pub codec_suffix: String,
    /// Field-name prefix dropped from wire names (`my` turns `myName` into
    /// `name`).
    pub strip_member_prefix: Option<String>,
    /// Diagnostics kept before the rest are summarized (0 = unlimited).
    pub error_limit: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            tag_member: DEFAULT_TAG_MEMBER.to_string(),
            codec_suffix: "_JsonCodec".to_string(),
            strip_member_prefix: None,
            error_limit: DiagnosticConfig::default().error_limit,
        }
    }
}

/// Everything one session produced.
#[derive(Clone, Debug)]
pub struct GeneratedUnit {
    pub tag_member: String,
    /// One plan per generated codec, dependencies first.
    pub plans: Vec<CodecPlan>,
    /// Emitted source per plan, same order.
    pub sources: Vec<GeneratedSource>,
    /// Type name to codec identity.
    pub identities: BTreeMap<String, String>,
    module: String,
}

impl GeneratedUnit {
    /// The complete emitted module.
    pub fn source(&self) -> &str {
        &self.module
    }

    /// Link the plans into a ready codec table.
    pub fn link(&self) -> CodecTable {
        CodecTable::from_plans(self.tag_member.clone(), &self.plans)
    }

    /// Plans as pretty-printed JSON.
    pub fn plans_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.plans)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// A single generation request over one type graph.
pub struct GenerationSession<'g> {
    classifier: TypeClassifier<'g>,
    config: GeneratorConfig,
    registry: GenerationRegistry,
    queue: DiagnosticQueue,
}

impl<'g> GenerationSession<'g> {
    pub fn new(graph: &'g TypeGraph, config: GeneratorConfig) -> Self {
        let queue = DiagnosticQueue::with_config(DiagnosticConfig {
            error_limit: config.error_limit,
            ..DiagnosticConfig::default()
        });
        GenerationSession {
            classifier: TypeClassifier::new(graph),
            config,
            registry: GenerationRegistry::new(),
            queue,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate codecs for `roots` and everything they reach.
    #[tracing::instrument(level = "debug", skip_all, fields(roots = roots.len()))]
    pub fn generate(mut self, roots: &[TypeId]) -> Result<GeneratedUnit, GenerationFailed> {
        {
            let mut walker = Walker::new(
                &self.classifier,
                &mut self.registry,
                &mut self.queue,
                &self.config.codec_suffix,
            );
            for &root in roots {
                walker.walk_root(root);
            }
        }
        if self.queue.has_errors().is_some() {
            let diagnostics = self.queue.flush();
            tracing::debug!(errors = diagnostics.len(), "generation aborted");
            return Err(GenerationFailed::new(diagnostics));
        }
        tracing::debug!(codecs = self.registry.len(), "walk complete");

        let builder = PlanBuilder::new(&self.classifier, self.config.strip_member_prefix.as_deref());
        let plans = builder
            .build_all(&mut self.registry)
            .map_err(|diag| GenerationFailed::new(vec![diag]))?;

        let identities: BTreeMap<String, String> = self
            .registry
            .records()
            .iter()
            .map(|r| (r.type_name.clone(), r.identity.clone()))
            .collect();
        let emitter = Emitter::new(&self.config.tag_member, &self.config.codec_suffix)
            .with_identities(identities.clone());
        let sources: Vec<GeneratedSource> = plans.iter().map(|plan| emitter.emit_plan(plan)).collect();
        let module = emitter.emit_unit(&plans, &sources);

        Ok(GeneratedUnit {
            tag_member: self.config.tag_member,
            plans,
            sources,
            identities,
            module,
        })
    }
}

/// Generate codecs for `roots` in one fresh session.
pub fn generate(
    graph: &TypeGraph,
    roots: &[TypeId],
    config: GeneratorConfig,
) -> Result<GeneratedUnit, GenerationFailed> {
    GenerationSession::new(graph, config).generate(roots)
}

/// Generate codecs for a loaded schema's roots.
pub fn generate_schema(
    schema: &LoadedSchema,
    config: GeneratorConfig,
) -> Result<GeneratedUnit, GenerationFailed> {
    generate(&schema.graph, &schema.roots, config)
}
