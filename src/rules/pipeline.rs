//! Mechanism approval pipeline advancement.

use super::Rejection;
use crate::models::{PipelineStage, Role};

/// Compute the next pipeline stage for a mechanism, gated by caller role.
///
/// Each non-terminal stage has exactly one legal successor and exactly one
/// role authorized to trigger that transition (see
/// [`PipelineStage::advancing_role`]). The function only decides; it never
/// mutates, so a rejection trivially leaves the mechanism untouched and the
/// caller applies the returned stage in a single write.
pub fn advance(stage: PipelineStage, caller_role: Role) -> Result<PipelineStage, Rejection> {
    let (Some(next), Some(required)) = (stage.next(), stage.advancing_role()) else {
        return Err(Rejection::TerminalStage { stage });
    };

    if caller_role != required {
        return Err(Rejection::InsufficientRole { stage, required });
    }

    Ok(next)
}
