use partsort_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ordering strategy selectable per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Dendrogram leaf order (visual similarity)
    #[default]
    Hierarchical,
    /// Fiedler vector of the similarity graph
    Spectral,
    /// Nearest-neighbour path from the most central part
    Greedy,
    /// Category, material, size, length
    Fuzzy,
    /// Case-insensitive text sort
    Alphabetical,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Hierarchical,
        Strategy::Spectral,
        Strategy::Greedy,
        Strategy::Fuzzy,
        Strategy::Alphabetical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Hierarchical => "hierarchical",
            Strategy::Spectral => "spectral",
            Strategy::Greedy => "greedy",
            Strategy::Fuzzy => "fuzzy",
            Strategy::Alphabetical => "alphabetical",
        }
    }

    /// Consumes a distance matrix
    pub fn uses_distances(self) -> bool {
        matches!(self, Strategy::Hierarchical | Strategy::Spectral | Strategy::Greedy)
    }

    /// Subject to the matrix size cap (super-quadratic work)
    pub fn is_capped(self) -> bool {
        matches!(self, Strategy::Hierarchical | Strategy::Spectral)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hierarchical" | "similar" | "visual" | "cluster" => Ok(Strategy::Hierarchical),
            "spectral" => Ok(Strategy::Spectral),
            "greedy" | "tsp" => Ok(Strategy::Greedy),
            "fuzzy" | "dimension" | "smart" => Ok(Strategy::Fuzzy),
            "alphabetical" | "alpha" | "text" => Ok(Strategy::Alphabetical),
            _ => Err(Error::UnknownStrategy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_aliases() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.as_str().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!("Visual".parse::<Strategy>().unwrap(), Strategy::Hierarchical);
        assert_eq!("similar".parse::<Strategy>().unwrap(), Strategy::Hierarchical);
        assert_eq!("text".parse::<Strategy>().unwrap(), Strategy::Alphabetical);
    }

    #[test]
    fn test_unknown_strategy() {
        let err = "random".parse::<Strategy>().unwrap_err();
        assert!(matches!(err, Error::UnknownStrategy(name) if name == "random"));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Strategy::Spectral).unwrap();
        assert_eq!(json, "\"spectral\"");
        let parsed: Strategy = serde_json::from_str("\"fuzzy\"").unwrap();
        assert_eq!(parsed, Strategy::Fuzzy);
    }

    #[test]
    fn test_capped_strategies() {
        assert!(Strategy::Hierarchical.is_capped());
        assert!(Strategy::Spectral.is_capped());
        assert!(!Strategy::Greedy.is_capped());
        assert!(Strategy::Greedy.uses_distances());
        assert!(!Strategy::Fuzzy.uses_distances());
    }
}
