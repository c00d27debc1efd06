//! Decision rules for activity transitions and the mechanism pipeline.
//!
//! Everything here is a pure function over a caller-provided snapshot: no
//! I/O, no clocks, no hidden state. Callers (the engine) read a fresh
//! snapshot, consult the rules, and perform a single persistence write on
//! approval.

pub mod dependency;
pub mod pipeline;
pub mod transition;

pub use dependency::is_blocked;
pub use pipeline::advance;
pub use transition::validate_transition;

use crate::models::{PipelineStage, Role};

/// Why a requested operation was not approved.
///
/// Rejections are the only "failure" the rules produce: malformed or
/// dangling data degrades to a permissive default instead of erroring.
/// Store and I/O failures are a collaborator concern, surfaced separately
/// by the engine as `anyhow` errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The activity's upstream dependency is not done.
    #[error("blocked by dependency {code}: the dependency is not done")]
    BlockedByDependency { code: String },

    /// Completion requested while the required evidence is missing.
    #[error("missing required evidence: {requirement}")]
    MissingEvidence { requirement: String },

    /// The caller's role may not advance the mechanism out of this stage.
    #[error("insufficient permission: only role {required} may advance stage {stage}")]
    InsufficientRole { stage: PipelineStage, required: Role },

    /// The mechanism is already at the final stage.
    #[error("already at final stage or unknown state: {stage}")]
    TerminalStage { stage: PipelineStage },
}
