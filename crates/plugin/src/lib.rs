//! Menu Icons integration layer.
//!
//! Wires the data model, store, and renderer together the way the host
//! platform drives them: items are enriched with merged settings on load,
//! the admin form controller sanitizes and persists submissions, and
//! activation is gated on host requirements. Services here are plain
//! constructed values handed into the request context; there is no global
//! state.

pub mod admin;
pub mod menu;
pub mod requirements;

pub use admin::{sanitize, save, SaveHooks, SaveOutcome, SubmittedFields};
pub use menu::{enrich, EnrichedMenuItem, MenuItem};
pub use requirements::{HostEnv, Requirements, RequirementsReport};
