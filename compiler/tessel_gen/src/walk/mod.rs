//! Dependency walker.
//!
//! Starting from the requested roots, visits every type reachable through
//! superclasses (when they contribute fields), subtypes, serializable
//! fields, type arguments and array components. Each type needing a
//! generated codec is registered before its dependencies are visited, so
//! cycles terminate.
//!
//! The walker never stops at the first problem. Every unsupported type is
//! reported to the [`DiagnosticQueue`] with the chain of types and fields
//! that reached it, and the walk continues with the next sibling.

use tessel_diagnostic::{
    abstract_not_allowed, missing_type_arguments, unknown_root, unsupported_type, ContextFrame,
    Diagnostic, DiagnosticQueue, ErrorCode,
};
use tessel_ir::{TypeId, TypeKind};

use crate::classify::{Classification, MapKeys, TypeClassifier};
use crate::registry::{GenerationRegistry, RegistryError};

/// Walk state for one session.
pub struct Walker<'a, 'g> {
    classifier: &'a TypeClassifier<'g>,
    registry: &'a mut GenerationRegistry,
    queue: &'a mut DiagnosticQueue,
    codec_suffix: &'a str,
    /// Outermost first.
    context: Vec<ContextFrame>,
}

impl<'a, 'g> Walker<'a, 'g> {
    pub fn new(
        classifier: &'a TypeClassifier<'g>,
        registry: &'a mut GenerationRegistry,
        queue: &'a mut DiagnosticQueue,
        codec_suffix: &'a str,
    ) -> Self {
        Walker {
            classifier,
            registry,
            queue,
            codec_suffix,
            context: Vec::new(),
        }
    }

    /// Walk one requested root.
    ///
    /// A root must be a class, enum or container. An abstract root needs at
    /// least one concrete subtype.
    pub fn walk_root(&mut self, root: TypeId) {
        let graph = self.classifier.graph();
        let name = graph.name(root);
        tracing::debug!(root = name, "walking root");
        self.context.push(ContextFrame::Root(name.to_string()));
        match self.classifier.classify(root) {
            Classification::Primitive(_)
            | Classification::Boxed(_)
            | Classification::Str
            | Classification::Date
            | Classification::Timestamp
            | Classification::LocalDate
            | Classification::Any => self.report(unknown_root(name)),
            Classification::UserClass { class } if self.lacks_instances(class) => {
                self.report(abstract_not_allowed(name, "generation root"));
            }
            _ => self.visit(root),
        }
        self.context.pop();
    }

    fn visit(&mut self, id: TypeId) {
        tessel_stack::ensure_sufficient_stack(|| self.visit_inner(id));
    }

    fn visit_inner(&mut self, id: TypeId) {
        let graph = self.classifier.graph();
        match self.classifier.classify(id) {
            Classification::Primitive(_)
            | Classification::Boxed(_)
            | Classification::Str
            | Classification::Date
            | Classification::Timestamp
            | Classification::LocalDate
            | Classification::Any => {}
            Classification::Unsupported(why) => {
                self.report(unsupported_type(graph.name(id), why.reason()));
            }
            Classification::MissingTypeArguments => {
                self.report(missing_type_arguments(graph.name(id)));
            }
            Classification::Enum => {
                if self.register(id) {
                    self.finish(id);
                }
            }
            Classification::Array { component } => self.visit_argument(component),
            Classification::List { element } | Classification::Set { element } => {
                self.visit_argument(element);
            }
            Classification::Map { key, value, keys } => {
                if keys == MapKeys::Arbitrary {
                    self.check_map_key(key);
                }
                self.visit_argument(key);
                self.visit_argument(value);
            }
            Classification::UserClass { class } => {
                if let TypeKind::Parameterized { args, .. } = graph.kind(id) {
                    for &arg in args {
                        self.visit_argument(arg);
                    }
                }
                self.visit_class(class);
            }
        }
    }

    fn visit_argument(&mut self, arg: TypeId) {
        let name = self.classifier.graph().name(arg);
        self.context.push(ContextFrame::Argument(name.to_string()));
        self.visit(arg);
        self.context.pop();
    }

    fn visit_class(&mut self, class: TypeId) {
        if !self.register(class) {
            return;
        }
        let graph = self.classifier.graph();
        let name = graph.name(class);
        tracing::trace!(class = name, "visit class");
        self.context.push(ContextFrame::Type(name.to_string()));

        if graph.has_inherited_fields(class) {
            if let Some(sup) = graph.superclass(class) {
                self.visit(sup);
            }
        }
        for &sub in graph.subtypes(class) {
            self.visit(sub);
        }
        for field in graph.serializable_fields(class) {
            self.context.push(ContextFrame::Field {
                owner: name.to_string(),
                field: field.name.clone(),
            });
            self.visit(field.ty);
            self.context.pop();
        }

        self.context.pop();
        self.finish(class);
    }

    /// An arbitrary map key is decoded into an instance of its declared
    /// type, which must therefore be constructible.
    fn check_map_key(&mut self, key: TypeId) {
        if let Classification::UserClass { class } = self.classifier.classify(key) {
            if self.lacks_instances(class) {
                let name = self.classifier.graph().name(key);
                self.report(abstract_not_allowed(name, "map key"));
            }
        }
    }

    fn lacks_instances(&self, class: TypeId) -> bool {
        let graph = self.classifier.graph();
        graph.is_abstract(class) && graph.concrete_subtypes(class).next().is_none()
    }

    fn register(&mut self, id: TypeId) -> bool {
        let name = self.classifier.graph().name(id);
        if self.registry.contains(id) {
            return false;
        }
        let identity = self.registry.fresh_identity(name, self.codec_suffix);
        self.registry.register(id, name, identity)
    }

    fn finish(&mut self, id: TypeId) {
        if let Err(err) = self.registry.finish_walk(id) {
            self.report(internal_error(&err));
        }
    }

    fn report(&mut self, diag: Diagnostic) {
        self.queue.add(diag.with_context(self.context.iter().cloned()));
    }
}

/// Report a registry misuse.
pub(crate) fn internal_error(err: &RegistryError) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9001).with_message(format!("internal generator error: {err}"))
}
