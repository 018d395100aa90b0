use std::path::{Path, PathBuf};

use {
    secrecy::Secret,
    tracing::{debug, warn},
};

use crate::schema::CourierConfig;

const CONFIG_FILENAME: &str = "courier.toml";

/// Load config from the given path.
pub fn load_config(path: &Path) -> anyhow::Result<CourierConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    Ok(toml::from_str(&raw)?)
}

/// Load config from an explicit path (the `--config` flag), then apply env
/// overrides. Unlike discovery, a missing or malformed file is an error —
/// an operator who named a file wants to know it was not used.
pub fn load_from(path: &Path) -> anyhow::Result<CourierConfig> {
    let mut config = load_config(path)?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Discover and load config from standard locations, then apply env
/// overrides.
///
/// Search order:
/// 1. `./courier.toml` (project-local)
/// 2. `~/.config/courier/courier.toml` (user-global)
///
/// Returns `CourierConfig::default()` (plus env overrides) if no config file
/// is found.
#[must_use]
pub fn discover_and_load() -> CourierConfig {
    let mut config = match find_config_file() {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            match load_config(&path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                    CourierConfig::default()
                },
            }
        },
        None => {
            debug!("no config file found, using defaults");
            CourierConfig::default()
        },
    };
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.exists() {
        return Some(local);
    }
    let global = config_dir()?.join(CONFIG_FILENAME);
    global.exists().then_some(global)
}

/// Returns the user-global config directory (`~/.config/courier/`).
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "courier").map(|d| d.config_dir().to_path_buf())
}

/// Overlay environment variables onto a loaded config. `lookup` is injected
/// so tests can drive it without mutating the process environment.
fn apply_env_overrides(
    config: &mut CourierConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    let first_of = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| lookup(name).filter(|v| !v.is_empty()))
    };

    if let Some(token) = first_of(&["COURIER_CHANNEL_TOKEN", "CHANNEL_ACCESS_TOKEN"]) {
        config.channel_access_token = Secret::new(token);
    }
    if let Some(secret) = first_of(&["COURIER_CHANNEL_SECRET", "CHANNEL_SECRET"]) {
        config.channel_secret = Secret::new(secret);
    }
    if let Some(bind) = first_of(&["COURIER_BIND"]) {
        config.bind = bind;
    }
    if let Some(port) = first_of(&["COURIER_PORT"]) {
        match port.parse() {
            Ok(port) => config.port = port,
            Err(_) => warn!(port, "ignoring non-numeric COURIER_PORT"),
        }
    }
    if let Some(path) = first_of(&["COURIER_SUBSCRIBERS_FILE"]) {
        config.subscribers_file = PathBuf::from(path);
    }
}
