use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Complexity label assigned to a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// Short conversational prompt, served by the low-cost model
    Simple,
    /// Long, code-bearing, or analytical prompt, served by the stronger model
    Complex,
}

impl Classification {
    /// Whether this label routes to the stronger model
    #[must_use]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn display_is_uppercase() {
        assert_eq!(Classification::Simple.to_string(), "SIMPLE");
        assert_eq!(Classification::Complex.to_string(), "COMPLEX");
    }

    #[test]
    fn parses_from_label() {
        assert_eq!(Classification::from_str("COMPLEX").unwrap(), Classification::Complex);
        assert!(Classification::from_str("medium").is_err());
    }

    #[test]
    fn only_complex_takes_the_stronger_model() {
        assert!(Classification::Complex.is_complex());
        assert!(!Classification::Simple.is_complex());
    }

    #[test]
    fn serde_uses_label() {
        let json = serde_json::to_string(&Classification::Simple).unwrap();
        assert_eq!(json, "\"SIMPLE\"");
    }
}
