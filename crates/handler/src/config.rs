use model::env::TABLE_NAME;

/// Settings supplied by the function's environment.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerConfig {
    pub table_name: String,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("missing {0} environment variable")]
    MissingVariable(&'static str),
}

impl HandlerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, treating empty values as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name: String = lookup(TABLE_NAME)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVariable(TABLE_NAME))?;

        Ok(HandlerConfig { table_name })
    }
}
