use std::{env, path::PathBuf};

use log::warn;

pub const PROGRAM_NAME: &str = "darion";
pub const PROGRAM_LOG_LEVEL: &str = "DARION_LOG_LEVEL";

pub const ENV_DEFAULT_CRITERION: &str = "DARION_DEFAULT_CRITERION";
pub const ENV_RECURSIVE: &str = "DARION_RECURSIVE";
pub const ENV_SNIFF_LEN: &str = "DARION_SNIFF_LEN";
pub const ENV_HISTORY: &str = "DARION_HISTORY";

pub const DEFAULT_CRITERION: &str = "type";

/// Number of leading bytes read for content sniffing.
/// Large enough to reach the `ustar` marker and the first OOXML part names.
pub const DEFAULT_SNIFF_LEN: usize = 8 * 1024;

/// Runtime settings handed explicitly to the sorter and the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Criterion used when a request does not name one.
    /// Kept verbatim; the sorter is responsible for validating it.
    pub default_criterion: String,
    /// Whether requests without an explicit flag descend into subdirectories.
    pub default_recursive: bool,
    pub sniff_len: usize,
    pub history_enabled: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            default_criterion: DEFAULT_CRITERION.to_owned(),
            default_recursive: true,
            sniff_len: DEFAULT_SNIFF_LEN,
            history_enabled: true,
        }
    }
}

impl AgentConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, falling back to defaults
    /// for anything missing or unparseable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(criterion) = lookup(ENV_DEFAULT_CRITERION)
            && !criterion.trim().is_empty()
        {
            cfg.default_criterion = criterion.trim().to_owned();
        }

        if let Some(raw) = lookup(ENV_RECURSIVE) {
            match parse_bool(&raw) {
                Some(v) => cfg.default_recursive = v,
                None => warn!("[config] ignoring {ENV_RECURSIVE}={raw:?}: expected a boolean"),
            }
        }

        if let Some(raw) = lookup(ENV_SNIFF_LEN) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => cfg.sniff_len = n,
                _ => warn!("[config] ignoring {ENV_SNIFF_LEN}={raw:?}: expected a positive integer"),
            }
        }

        if let Some(raw) = lookup(ENV_HISTORY) {
            match parse_bool(&raw) {
                Some(v) => cfg.history_enabled = v,
                None => warn!("[config] ignoring {ENV_HISTORY}={raw:?}: expected a boolean"),
            }
        }

        cfg
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Directory holding persistent program state (history log).
pub fn state_dir() -> Option<PathBuf> {
    // Check XDG_STATE_HOME first (Linux)
    if let Ok(xdg_state) = env::var("XDG_STATE_HOME")
        && !xdg_state.is_empty()
    {
        return Some(PathBuf::from(xdg_state).join(PROGRAM_NAME));
    }

    // Fall back to dirs crate
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|p| p.join(PROGRAM_NAME))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
