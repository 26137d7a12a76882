//! Extraction settings shared by the library and the CLI.

use serde::Deserialize;

/// Knobs of the extraction engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Largest accepted gap between a reported tally and its resolved name list.
    pub count_tolerance: u32,
    /// Levels between a roll-call marker text node and its vote table.
    pub table_ancestor_depth: usize,
    /// Root prepended to every URI in JSON output.
    pub base_uri: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            count_tolerance: 2,
            table_ancestor_depth: 6,
            base_uri: "/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ExtractConfig::default();
        assert_eq!(config.count_tolerance, 2);
        assert_eq!(config.table_ancestor_depth, 6);
        assert_eq!(config.base_uri, "/");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ExtractConfig = serde_json::from_str(r#"{"count_tolerance": 4}"#).unwrap();
        assert_eq!(config.count_tolerance, 4);
        assert_eq!(config.table_ancestor_depth, 6);
    }
}
