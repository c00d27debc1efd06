use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::Role;

/// A financing mechanism moving through the approval pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mechanism {
    pub id: String,
    pub name: String,
    pub stage: PipelineStage,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stage of a mechanism in the approval pipeline.
///
/// The pipeline is strictly linear, with one authorized role per transition:
/// - `Draft` → `LegalReview` (advanced by FINANZAS)
/// - `LegalReview` → `GenderReview` (advanced by LEGAL)
/// - `GenderReview` → `Approved` (advanced by COORD)
/// - `Approved` is a terminal state
///
/// There is no skipping and no backward transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PipelineStage {
    #[serde(rename = "draft", alias = "DRAFT")]
    Draft,

    #[serde(rename = "legal-review", alias = "LEGAL_REVIEW")]
    LegalReview,

    #[serde(rename = "gender-review", alias = "GENDER_REVIEW")]
    GenderReview,

    #[serde(rename = "approved", alias = "APPROVED")]
    Approved,
}

impl PipelineStage {
    /// All stages, in pipeline order.
    pub fn all() -> [PipelineStage; 4] {
        [
            PipelineStage::Draft,
            PipelineStage::LegalReview,
            PipelineStage::GenderReview,
            PipelineStage::Approved,
        ]
    }

    /// The single legal next stage, or `None` for the terminal stage.
    pub fn next(&self) -> Option<PipelineStage> {
        match self {
            PipelineStage::Draft => Some(PipelineStage::LegalReview),
            PipelineStage::LegalReview => Some(PipelineStage::GenderReview),
            PipelineStage::GenderReview => Some(PipelineStage::Approved),
            PipelineStage::Approved => None,
        }
    }

    /// The one role authorized to advance out of this stage, or `None` for
    /// the terminal stage.
    pub fn advancing_role(&self) -> Option<Role> {
        match self {
            PipelineStage::Draft => Some(Role::Finanzas),
            PipelineStage::LegalReview => Some(Role::Legal),
            PipelineStage::GenderReview => Some(Role::Coord),
            PipelineStage::Approved => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Draft => write!(f, "draft"),
            PipelineStage::LegalReview => write!(f, "legal-review"),
            PipelineStage::GenderReview => write!(f, "gender-review"),
            PipelineStage::Approved => write!(f, "approved"),
        }
    }
}

impl std::str::FromStr for PipelineStage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(PipelineStage::Draft),
            "legal-review" | "legal_review" => Ok(PipelineStage::LegalReview),
            "gender-review" | "gender_review" => Ok(PipelineStage::GenderReview),
            "approved" => Ok(PipelineStage::Approved),
            _ => anyhow::bail!(
                "Invalid pipeline stage: {s}. Valid values: draft, legal-review, gender-review, approved"
            ),
        }
    }
}

impl Mechanism {
    pub fn new(id: String, name: String, created_by: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            stage: PipelineStage::Draft,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_stage(&mut self, stage: PipelineStage) {
        self.stage = stage;
        self.updated_at = Utc::now();
    }
}
