use serde::{Deserialize, Serialize};

/// Which side of the reconciliation a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRole {
    /// Price and valuation provider (price, P/L, P/VP, DY).
    Primary,
    /// Profitability and leverage provider (ROE, ROIC, debt ratios).
    Secondary,
}

impl std::fmt::Display for SourceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}
