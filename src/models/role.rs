use serde::{Deserialize, Serialize};

/// Responsible roles across the program.
///
/// Roles are a closed set: free-text role strings from earlier data exports
/// are normalized at the edges (CLI parsing, legacy serde aliases), never
/// stored raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Finance team: owns financing mechanism drafts and budget activities.
    #[serde(rename = "finanzas", alias = "FINANZAS")]
    Finanzas,

    /// Legal team: owns regulatory activities and legal review.
    #[serde(rename = "legal", alias = "LEGAL")]
    Legal,

    /// Program coordination: owns cross-cutting activities and final sign-off.
    #[serde(rename = "coord", alias = "COORD")]
    Coord,

    /// Government observer: read-mostly counterpart role.
    #[serde(rename = "gobierno", alias = "GOBIERNO")]
    Gobierno,
}

impl Role {
    /// All roles, in reporting order.
    pub fn all() -> [Role; 4] {
        [Role::Finanzas, Role::Legal, Role::Coord, Role::Gobierno]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Finanzas => write!(f, "FINANZAS"),
            Role::Legal => write!(f, "LEGAL"),
            Role::Coord => write!(f, "COORD"),
            Role::Gobierno => write!(f, "GOBIERNO"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "finanzas" => Ok(Role::Finanzas),
            "legal" => Ok(Role::Legal),
            "coord" => Ok(Role::Coord),
            "gobierno" => Ok(Role::Gobierno),
            _ => anyhow::bail!(
                "Invalid role: {s}. Valid values: finanzas, legal, coord, gobierno"
            ),
        }
    }
}
