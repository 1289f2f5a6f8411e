//! Environment-derived configuration.

pub const ENV_API_KEY: &str = "TRELLO_API_KEY";
pub const ENV_TOKEN: &str = "TRELLO_TOKEN";
pub const ENV_BOARD_ID: &str = "TRELLO_BOARD_ID";
pub const ENV_WORKSPACE_ID: &str = "TRELLO_WORKSPACE_ID";
pub const ENV_DEBUG: &str = "MCP_DEBUG";
pub const ENV_ENVIRONMENT: &str = "ENVIRONMENT";

/// Settings read once at startup.
///
/// Credentials stay optional here; the client rejects missing ones when it
/// is constructed, so a bad environment is reported in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrelloConfig {
    pub api_key: Option<String>,
    pub token: Option<String>,
    pub board_id: Option<String>,
    pub workspace_id: Option<String>,
    pub debug: bool,
    pub environment: Option<String>,
}

impl TrelloConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_empty(ENV_API_KEY),
            token: non_empty(ENV_TOKEN),
            board_id: non_empty(ENV_BOARD_ID),
            workspace_id: non_empty(ENV_WORKSPACE_ID),
            debug: lookup(ENV_DEBUG).as_deref().map(is_enabled).unwrap_or(false),
            environment: non_empty(ENV_ENVIRONMENT),
        }
    }

    pub fn effective_environment(&self) -> &str {
        self.environment.as_deref().unwrap_or("development")
    }
}

/// Diagnostic toggle parsing: `1`, `true` and `yes` in any case.
pub fn is_enabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> TrelloConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TrelloConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_is_enabled_literals() {
        for value in ["1", "true", "TRUE", "Yes", "yes"] {
            assert!(is_enabled(value), "{value} should enable debug");
        }
        for value in ["0", "false", "no", "on", "", "2"] {
            assert!(!is_enabled(value), "{value} should not enable debug");
        }
    }

    #[test]
    fn test_from_lookup_reads_all_fields() {
        let config = config_from(&[
            (ENV_API_KEY, "key123"),
            (ENV_TOKEN, "tok456"),
            (ENV_BOARD_ID, "board1"),
            (ENV_WORKSPACE_ID, "ws1"),
            (ENV_DEBUG, "True"),
            (ENV_ENVIRONMENT, "production"),
        ]);
        assert_eq!(config.api_key.as_deref(), Some("key123"));
        assert_eq!(config.token.as_deref(), Some("tok456"));
        assert_eq!(config.board_id.as_deref(), Some("board1"));
        assert_eq!(config.workspace_id.as_deref(), Some("ws1"));
        assert!(config.debug);
        assert_eq!(config.effective_environment(), "production");
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = config_from(&[(ENV_API_KEY, ""), (ENV_BOARD_ID, "  ")]);
        assert_eq!(config.api_key, None);
        assert_eq!(config.board_id, None);
        assert!(!config.debug);
        assert_eq!(config.effective_environment(), "development");
    }
}
