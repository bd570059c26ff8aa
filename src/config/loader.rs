//! Walking configuration files (std only).
//!
//! A file holds the top-level timing keys (`switch_ratio`,
//! `terminal_half_switch_time`, `step_height`, `swing_apex_ratio`) and the
//! optional `[pause]`, `[zmp]` and `[com]` tables. Missing keys take their
//! defaults; the result is validated as a whole before it is returned.

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::InterpolatorConfig;

/// Error payload truncated to its capacity on a character boundary.
fn bounded(text: &str) -> heapless::String<128> {
    let mut out = heapless::String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Name of the table enclosing byte `offset`, `None` for the top level.
fn section_at(content: &str, offset: usize) -> Option<&str> {
    content
        .get(..offset)?
        .lines()
        .rev()
        .map(str::trim_start)
        .find(|line| line.starts_with('['))
        .and_then(|header| header.trim_start_matches('[').split(']').next())
        .map(str::trim)
}

/// Parse error located by line and table.
fn parse_error(content: &str, error: &toml::de::Error) -> ConfigError {
    let located = error.span().map(|span| {
        let line = content
            .get(..span.start)
            .map_or(1, |prefix| prefix.matches('\n').count() + 1);
        match section_at(content, span.start) {
            Some(section) => format!("line {} in [{}]: {}", line, section, error.message()),
            None => format!("line {}: {}", line, error.message()),
        }
    });
    ConfigError::ParseError(bounded(located.as_deref().unwrap_or(error.message())))
}

/// Load the walking configuration from a TOML file.
///
/// # Errors
///
/// Returns [`ConfigError::IoError`] if the file cannot be read, and the
/// errors of [`parse_config`] otherwise.
///
/// # Example
///
/// ```rust,ignore
/// use footstep_interpolator::load_config;
///
/// let config = load_config("walking.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<InterpolatorConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        let msg = format!("{}: {}", path.display(), e);
        Error::Config(ConfigError::IoError(bounded(&msg)))
    })?;

    parse_config(&content)
}

/// Parse the walking configuration from a TOML string.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`], naming the line and table of the
/// offending entry, if the TOML is malformed or holds a value of the wrong
/// type. Returns the matching [`ConfigError`] if a value is out of range.
pub fn parse_config(content: &str) -> Result<InterpolatorConfig> {
    let config: InterpolatorConfig = toml::from_str(content)
        .map_err(|e| Error::Config(parse_error(content, &e)))?;

    super::validation::validate_config(&config)?;
    log::debug!(
        "Loaded walking configuration (switch ratio {}, pause {})",
        config.switch_ratio,
        if config.pause.is_some() { "on" } else { "off" }
    );

    Ok(config)
}
