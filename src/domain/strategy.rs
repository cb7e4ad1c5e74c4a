//! Execution strategy for the compute phase of an advance.
//!
//! Both strategies are interchangeable: same inputs, same change stream,
//! different execution substrate.

use serde::{Deserialize, Serialize};

/// How the successor generation is computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Row by row on the calling thread
    Serial,
    /// Rows split across the rayon pool, one disjoint output row per task
    #[default]
    Parallel,
}

impl Strategy {
    /// Get all available strategies
    pub fn all() -> Vec<Strategy> {
        vec![Strategy::Serial, Strategy::Parallel]
    }

    /// Display name for logs and benchmark output
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Serial => "Serial",
            Strategy::Parallel => "Parallel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_parallel() {
        assert_eq!(Strategy::default(), Strategy::Parallel);
    }

    #[test]
    fn test_names_are_unique() {
        let names: Vec<_> = Strategy::all().iter().map(|s| s.name()).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Strategy::Serial).unwrap();
        assert_eq!(json, "\"serial\"");
    }
}
