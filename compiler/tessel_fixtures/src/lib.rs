//! Codec modules emitted by `tessel_gen` for the schemas under `schemas/`,
//! compiled as ordinary Rust.
//!
//! `build.rs` runs the generator; the tests check every emitted codec
//! against the table [`link`](tessel_gen::GeneratedUnit::link) builds from
//! the same plans.

/// Codecs for `schemas/kennel.json`.
#[allow(clippy::pedantic, reason = "generated code")]
pub mod kennel {
    include!(concat!(env!("OUT_DIR"), "/kennel_codecs.rs"));
}
