use regex::{Captures, Regex};
use std::env;

use crate::utils::errors::ResultWithError;

pub struct VariablesUtils {}

impl VariablesUtils {
    /// Expands ${VAR} or $VAR patterns using the current environment.
    /// Unset variables expand to an empty string.
    pub fn expand_env_vars(input: &str) -> ResultWithError<String> {
        let re = Regex::new(r"\$\{([^}]+)\}|\$([A-Za-z0-9_]+)")?;
        Ok(re
            .replace_all(input, |caps: &Captures| {
                caps.get(1)
                    .or_else(|| caps.get(2))
                    .and_then(|key| env::var(key.as_str()).ok())
                    .unwrap_or_default()
            })
            .to_string())
    }
}
