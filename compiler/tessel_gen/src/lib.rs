//! Tessel codec generator.
//!
//! Given a [`TypeGraph`](tessel_ir::TypeGraph) and a set of root types,
//! produces a JSON codec for every reachable type that needs one:
//!
//! 1. [`walk`] visits everything the roots reach, registering each type in
//!    the [`registry`] before recursing and collecting diagnostics.
//! 2. If anything is unsupported, generation fails with every diagnostic.
//! 3. [`plan`] builds one [`CodecPlan`](tessel_runtime::CodecPlan) per type.
//! 4. [`emit`] renders the plans to Rust source.
//!
//! [`session`] drives the whole pipeline.

pub mod classify;
pub mod emit;
pub mod plan;
pub mod registry;
pub mod session;
pub mod walk;

pub use classify::{classify, Classification, MapKeys, TypeClassifier, Unsupported};
pub use emit::{Emitter, GeneratedSource, SourceWriter};
pub use plan::PlanBuilder;
pub use registry::{codec_identity, DependencyRecord, GenState, GenerationRegistry, RegistryError};
pub use session::{generate, generate_schema, GeneratedUnit, GenerationSession, GeneratorConfig};
pub use walk::Walker;
