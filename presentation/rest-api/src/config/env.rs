use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::anyhow;

/// Reads an environment variable, treating blank values as unset.
pub fn read(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parses `raw` when present, otherwise returns `default`.
pub fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| anyhow!("{key} has invalid value {value:?}: {e}")),
        None => Ok(default),
    }
}
