//! Session credential resolution from flags, environment, and the config file.

use std::path::{Path, PathBuf};

pub const SESSION_KEY_ENV: &str = "CLAUDE_SESSION_KEY";
pub const ORG_ID_ENV: &str = "CLAUDE_ORG_ID";

/// Effective credentials after merging all sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub session_key: Option<String>,
    pub organization_id: Option<String>,
}

/// Values read from the `key=value` config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub session_key: Option<String>,
    pub org_id: Option<String>,
}

/// Path of the config file, `<user config dir>/claude-usage/config`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("claude-usage").join("config"))
}

/// Loads the config file. A missing or unreadable file is an empty config.
pub fn load_config() -> ConfigFile {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => ConfigFile::default(),
    }
}

fn load_config_from(path: &Path) -> ConfigFile {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(err) => {
            tracing::debug!("no config file at {}: {}", path.display(), err);
            ConfigFile::default()
        }
    }
}

/// Parses `key=value` lines. Blank lines, `#` comments, and lines without
/// `=` are skipped; keys and values are trimmed; the last occurrence of a
/// key wins.
fn parse_config(content: &str) -> ConfigFile {
    let mut config = ConfigFile::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key.trim() {
            "session_key" => config.session_key = Some(value.trim().to_string()),
            "org_id" => config.org_id = Some(value.trim().to_string()),
            _ => {}
        }
    }
    config
}

/// Merges flag, environment, and config-file values. The first non-empty
/// candidate wins per field, in that order.
pub fn resolve(
    flag_key: Option<String>,
    flag_org: Option<String>,
    config: ConfigFile,
) -> Credentials {
    Credentials {
        session_key: first_non_empty([
            flag_key,
            std::env::var(SESSION_KEY_ENV).ok(),
            config.session_key,
        ]),
        organization_id: first_non_empty([
            flag_org,
            std::env::var(ORG_ID_ENV).ok(),
            config.org_id,
        ]),
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().find(|v| !v.is_empty())
}
