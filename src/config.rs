use std::fs;
use std::path::PathBuf;
use cross_xdg::BaseDirs;

use crate::interpreter::DEFAULT_MEMORY_SIZE;

/// Environment variable consulted when no `--memory-size` flag is given.
pub const MEMORY_SIZE_ENV: &str = "BF_MEMORY_SIZE";

/// File name looked up in the XDG config home.
pub const CONFIG_FILE_NAME: &str = "bf.toml";

/// Effective runner settings after layering flags, environment and file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub memory_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self { memory_size: DEFAULT_MEMORY_SIZE }
    }
}

/// Values found in `bf.toml`. Missing keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSettings {
    pub memory_size: Option<usize>,
}

impl Settings {
    /// Resolve settings: flag -> env -> config file -> default.
    pub fn resolve(memory_size_flag: Option<usize>) -> Self {
        Self::layer(
            memory_size_flag,
            std::env::var(MEMORY_SIZE_ENV).ok(),
            load_from_toml,
        )
    }

    /// Layering without touching the process environment. The file is only
    /// read when neither the flag nor the env value decides the setting.
    pub fn layer<F>(memory_size_flag: Option<usize>, env_value: Option<String>, file: F) -> Self
    where
        F: FnOnce() -> Option<FileSettings>,
    {
        let memory_size = memory_size_flag
            .or_else(|| env_value.and_then(|s| s.trim().parse::<usize>().ok()))
            .or_else(|| file().and_then(|f| f.memory_size))
            .unwrap_or(DEFAULT_MEMORY_SIZE);

        Self { memory_size }
    }
}

/// Parse the `[interpreter]` section of a `bf.toml`.
///
/// Only `key = value` lines are understood; values may be quoted. Unknown
/// keys and sections are ignored, as are values that fail to parse.
pub fn parse_settings(content: &str) -> FileSettings {
    let mut in_interpreter = false;
    let mut settings = FileSettings::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        if line.starts_with('[') && line.ends_with(']') {
            in_interpreter = line[1..line.len() - 1].trim() == "interpreter";
            continue;
        }
        if !in_interpreter { continue; }

        let Some((key, val_raw)) = line.split_once('=') else { continue };
        // Strip a trailing comment before unquoting
        let val_raw = val_raw.split('#').next().unwrap_or_default().trim();
        let val = if val_raw.len() >= 2 && val_raw.starts_with('"') && val_raw.ends_with('"') {
            &val_raw[1..val_raw.len() - 1]
        } else {
            val_raw
        };

        if key.trim() == "memory_size" {
            if let Ok(n) = val.trim().parse::<usize>() {
                settings.memory_size = Some(n);
            }
        }
    }

    settings
}

fn load_from_toml() -> Option<FileSettings> {
    let Ok(base_dirs) = BaseDirs::new() else { return None };

    // On Linux: resolves to /home/<user>/.config
    // On Windows: resolves to C:\Users\<user>\.config
    // On macOS: resolves to /Users/<user>/.config
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push(CONFIG_FILE_NAME);

    let content = fs::read_to_string(path).ok()?;
    Some(parse_settings(&content))
}
