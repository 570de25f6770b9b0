//! Where the store finds the API.

/// Environment variable holding the API base URL.
pub const API_BASE_ENV: &str = "TODO_API_BASE";

/// Address of the development backend (`mock-server` listens here by default).
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub api_base: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    /// Read `TODO_API_BASE`, falling back to [`DEFAULT_API_BASE`] when it is
    /// unset or blank.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(API_BASE_ENV) {
            Some(base) if !base.trim().is_empty() => Self::new(base.trim()),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_when_unset() {
        let config = StoreConfig::from_lookup(|_| None);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn blank_value_counts_as_unset() {
        let config = StoreConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn reads_configured_base() {
        let config = StoreConfig::from_lookup(|key| {
            assert_eq!(key, API_BASE_ENV);
            Some(" https://todos.example.com ".to_string())
        });
        assert_eq!(config.api_base, "https://todos.example.com");
    }
}
