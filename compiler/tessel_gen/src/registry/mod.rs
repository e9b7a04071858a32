//! Generation registry.
//!
//! Records every type that needs a generated codec, in the order the walker
//! finished with it. A type is registered before the walker recurses into
//! its dependencies, so a cycle reaching the type again stops at the
//! registry instead of looping.
//!
//! # States
//!
//! ```text
//! Queued ──begin──▶ InProgress ──complete──▶ Complete
//! ```
//!
//! The registry is owned by one generation session and dropped with it.

use rustc_hash::{FxHashMap, FxHashSet};

use tessel_ir::TypeId;

/// Generation state of one codec.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GenState {
    /// Registered by the walker; no plan yet.
    Queued,
    /// The plan is being built.
    InProgress,
    Complete,
}

/// One registered codec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyRecord {
    pub type_id: TypeId,
    /// Qualified name of the type.
    pub type_name: String,
    /// Name of the emitted codec.
    pub identity: String,
    pub state: GenState,
}

/// Invalid registry operations. These indicate a generator bug.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("type {0:?} is not registered")]
    Unregistered(TypeId),
    #[error("`{type_name}` cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        type_name: String,
        from: GenState,
        to: GenState,
    },
}

/// Codec records for one session.
#[derive(Clone, Debug, Default)]
pub struct GenerationRegistry {
    records: Vec<DependencyRecord>,
    index: FxHashMap<TypeId, usize>,
    /// Record indices in walk post-order.
    order: Vec<usize>,
    /// Record indices already in `order`.
    ordered: FxHashSet<usize>,
    /// Identities handed out so far.
    identities: FxHashSet<String>,
}

/// Rust identifier for the codec of `type_name`.
///
/// `_` doubles to `__`; every other character that cannot appear in an
/// identifier becomes `_`. Names still mapping to the same text are
/// told apart by [`GenerationRegistry::fresh_identity`].
pub fn codec_identity(type_name: &str, suffix: &str) -> String {
    let mut ident = String::with_capacity(type_name.len() + suffix.len() + 1);
    if type_name.starts_with(|c: char| c.is_ascii_digit()) {
        ident.push('_');
    }
    for c in type_name.chars() {
        match c {
            '_' => ident.push_str("__"),
            c if c.is_ascii_alphanumeric() => ident.push(c),
            _ => ident.push('_'),
        }
    }
    ident.push_str(suffix);
    ident
}

impl GenerationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `id` unless it is already known. Returns `true` if newly queued.
    pub fn register(&mut self, id: TypeId, type_name: &str, identity: String) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        tracing::trace!(type_name, %identity, "queue codec");
        self.identities.insert(identity.clone());
        self.index.insert(id, self.records.len());
        self.records.push(DependencyRecord {
            type_id: id,
            type_name: type_name.to_string(),
            identity,
            state: GenState::Queued,
        });
        true
    }

    /// Identity for `type_name` that no registered codec holds yet.
    ///
    /// Collisions get a counter ahead of the suffix, in registration order.
    pub fn fresh_identity(&self, type_name: &str, suffix: &str) -> String {
        let identity = codec_identity(type_name, suffix);
        if !self.identities.contains(&identity) {
            return identity;
        }
        let stem = codec_identity(type_name, "");
        (2_usize..)
            .map(|n| format!("{stem}_{n}{suffix}"))
            .find(|candidate| !self.identities.contains(candidate))
            .unwrap_or(identity)
    }

    /// Mark the walker done with `id`. Fixes its position in the
    /// generation order.
    pub fn finish_walk(&mut self, id: TypeId) -> Result<(), RegistryError> {
        let index = self.position(id)?;
        if self.ordered.insert(index) {
            self.order.push(index);
        }
        Ok(())
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: TypeId) -> Option<&DependencyRecord> {
        self.index.get(&id).map(|&i| &self.records[i])
    }

    pub fn identity(&self, id: TypeId) -> Option<&str> {
        self.get(id).map(|r| r.identity.as_str())
    }

    pub fn state(&self, id: TypeId) -> Option<GenState> {
        self.get(id).map(|r| r.state)
    }

    /// `Queued` to `InProgress`.
    pub fn begin(&mut self, id: TypeId) -> Result<(), RegistryError> {
        self.transition(id, GenState::Queued, GenState::InProgress)
    }

    /// `InProgress` to `Complete`.
    pub fn complete(&mut self, id: TypeId) -> Result<(), RegistryError> {
        self.transition(id, GenState::InProgress, GenState::Complete)
    }

    fn position(&self, id: TypeId) -> Result<usize, RegistryError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(RegistryError::Unregistered(id))
    }

    fn transition(&mut self, id: TypeId, from: GenState, to: GenState) -> Result<(), RegistryError> {
        let index = self.position(id)?;
        let record = &mut self.records[index];
        if record.state != from {
            return Err(RegistryError::InvalidTransition {
                type_name: record.type_name.clone(),
                from: record.state,
                to,
            });
        }
        record.state = to;
        Ok(())
    }

    /// Type ids in generation order: a type follows every dependency the
    /// walker finished before it. Types still being walked are left out.
    pub fn generation_order(&self) -> Vec<TypeId> {
        self.order.iter().map(|&i| self.records[i].type_id).collect()
    }

    /// Records in registration order.
    pub fn records(&self) -> &[DependencyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether every registered codec has a finished plan.
    pub fn is_complete(&self) -> bool {
        self.records.iter().all(|r| r.state == GenState::Complete)
    }
}
