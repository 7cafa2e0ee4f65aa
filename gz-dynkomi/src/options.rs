//! Option-string parsing for strategy construction.
//!
//! Strategies are configured by a colon-separated list of `name` or
//! `name=value` tokens (the form an engine option like
//! `dynkomi=adaptive:lead_moves=10:indicator=value` routes through). Names
//! are matched case-insensitively. All parse failures are fatal at
//! construction time; there are no recoverable configuration errors.

use std::str::FromStr;
use thiserror::Error;

/// Construction-time configuration failure. No strategy is created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown dynkomi strategy `{name}`")]
    UnknownStrategy { name: String },
    #[error("dynkomi strategy `{strategy}` accepts no arguments")]
    UnexpectedArguments { strategy: &'static str },
    #[error("invalid dynkomi option `{name}` or missing value")]
    InvalidOption { name: String },
    #[error("invalid value `{value}` for dynkomi option `{name}`")]
    InvalidValue { name: String, value: String },
}

/// Split an option string into `(name, value)` tokens.
///
/// Empty tokens (doubled or trailing colons) are skipped; names are
/// lowercased so strategy code can match on fixed strings.
pub(crate) fn split_options(args: &str) -> impl Iterator<Item = (String, Option<&str>)> {
    args.split(':').filter(|t| !t.is_empty()).map(|token| {
        match token.split_once('=') {
            Some((name, value)) => (name.to_ascii_lowercase(), Some(value)),
            None => (token.to_ascii_lowercase(), None),
        }
    })
}

/// Parse the required numeric value of option `name`.
pub(crate) fn parse_value<T: FromStr>(name: &str, value: Option<&str>) -> Result<T, ConfigError> {
    let raw = value.ok_or_else(|| ConfigError::InvalidOption {
        name: name.to_string(),
    })?;
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

/// Parse a flag option: bare `name` means true, `name=N` means `N != 0`.
pub(crate) fn parse_flag(name: &str, value: Option<&str>) -> Result<bool, ConfigError> {
    match value {
        None => Ok(true),
        Some(_) => Ok(parse_value::<i32>(name, value)? != 0),
    }
}
