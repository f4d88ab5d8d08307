/// Application configuration: load, save, merge, and sanitize.
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::font::{FontSpec, TabSize};
use crate::theme::{builtin_dark, builtin_light, builtin_themes, ThemeDefinition, SYSTEM_THEME};

const DEFAULT_THEME: &str = "BluePurple";

/// Settings for the Run Module command.
///
/// Running the body as a program is arbitrary code execution, so it is off
/// unless the user opts in. When enabled the body runs in a child process
/// with a cleared environment, a scratch working directory, a wall-clock
/// timeout and a cap on captured output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunModuleConfig {
    pub enabled: bool,
    /// Program that receives the script path as its last argument.
    pub interpreter: String,
    /// Arguments placed before the script path.
    pub args: Vec<String>,
    /// File extension for the temporary script (without the dot).
    pub script_extension: String,
    pub timeout_secs: u64,
    pub max_output_bytes: usize,
}

impl Default for RunModuleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interpreter: "python3".to_string(),
            args: vec!["-I".to_string()],
            script_extension: "py".to_string(),
            timeout_secs: 10,
            max_output_bytes: 64 * 1024,
        }
    }
}

impl RunModuleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub current_theme: String,
    pub font_family: String,
    pub font_size: u8,
    pub tab_size: u8,
    /// Keep the session in a redb file across runs instead of memory only.
    pub persist_session: bool,
    /// Session database location. Empty = next to the executable.
    pub session_path: String,
    pub run_module: RunModuleConfig,
    pub themes: Vec<ThemeDefinition>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            current_theme: DEFAULT_THEME.to_string(),
            font_family: "Hack".to_string(),
            font_size: 12,
            tab_size: TabSize::DEFAULT.get(),
            persist_session: false,
            session_path: String::new(),
            run_module: RunModuleConfig::default(),
            themes: builtin_themes(),
        }
    }
}

impl AppConfig {
    /// Returns the config file path: exe directory + `codepad.json`.
    pub fn config_path() -> PathBuf {
        beside_exe("codepad.json")
    }

    /// Returns the session database path, honoring `session_path` when set.
    pub fn resolved_session_path(&self) -> PathBuf {
        if self.session_path.is_empty() {
            beside_exe("codepad-session.redb")
        } else {
            PathBuf::from(&self.session_path)
        }
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.with_builtins_merged();
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Broken file is left alone
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Ensures every built-in theme is present. User-defined themes with a
    /// built-in's name take priority; built-ins missing from the file are
    /// inserted at their catalog position.
    pub fn with_builtins_merged(&mut self) {
        for (idx, builtin) in builtin_themes().into_iter().enumerate() {
            if self.find_theme(&builtin.name).is_none() {
                let at = idx.min(self.themes.len());
                self.themes.insert(at, builtin);
            }
        }
    }

    /// Finds a theme by name.
    pub fn find_theme(&self, name: &str) -> Option<&ThemeDefinition> {
        self.themes.iter().find(|t| t.name == name)
    }

    /// All selectable theme names, [`SYSTEM_THEME`] first.
    pub fn theme_names(&self) -> Vec<String> {
        std::iter::once(SYSTEM_THEME.to_string())
            .chain(self.themes.iter().map(|t| t.name.clone()))
            .collect()
    }

    /// Resolves a theme name to a definition. `System` picks Dark or Light
    /// from `prefers_dark`; unknown names fall back to the default theme.
    pub fn resolve_theme(&self, name: &str, prefers_dark: bool) -> ThemeDefinition {
        let lookup = if name == SYSTEM_THEME {
            if prefers_dark {
                "Dark"
            } else {
                "Light"
            }
        } else {
            name
        };
        self.find_theme(lookup)
            .or_else(|| self.find_theme(DEFAULT_THEME))
            .cloned()
            .unwrap_or_else(|| {
                if prefers_dark {
                    builtin_dark()
                } else {
                    builtin_light()
                }
            })
    }

    /// The configured default font, snapped onto the practical sizes.
    pub fn default_font(&self) -> FontSpec {
        FontSpec::new(&self.font_family, FontSpec::snap_size(self.font_size))
    }

    pub fn default_tab_size(&self) -> TabSize {
        TabSize::clamped(self.tab_size)
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        self.font_size = FontSpec::snap_size(self.font_size);
        self.tab_size = TabSize::clamped(self.tab_size).get();
        if self.font_family.trim().is_empty() {
            self.font_family = "Hack".to_string();
        }
        if !self.theme_names().contains(&self.current_theme) {
            self.current_theme = DEFAULT_THEME.to_string();
        }
        self.run_module.timeout_secs = self.run_module.timeout_secs.max(1);
        self.run_module.max_output_bytes = self.run_module.max_output_bytes.max(1024);
    }
}

fn beside_exe(file_name: &str) -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.join(file_name)))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HexColor;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.current_theme, "BluePurple");
        assert_eq!(config.font_size, 12);
        assert_eq!(config.tab_size, 4);
        assert!(!config.persist_session);
        assert!(!config.run_module.enabled);
        assert_eq!(config.themes.len(), builtin_themes().len());
    }

    #[test]
    fn test_sanitize_clamps_tab_size() {
        let mut config = AppConfig::default();
        config.tab_size = 0;
        config.sanitize();
        assert_eq!(config.tab_size, 1);

        config.tab_size = 30;
        config.sanitize();
        assert_eq!(config.tab_size, 8);
    }

    #[test]
    fn test_sanitize_snaps_font_size() {
        let mut config = AppConfig::default();
        config.font_size = 72;
        config.sanitize();
        assert_eq!(config.font_size, 14);
    }

    #[test]
    fn test_sanitize_resets_unknown_theme() {
        let mut config = AppConfig::default();
        config.current_theme = "NonExistent".to_string();
        config.sanitize();
        assert_eq!(config.current_theme, "BluePurple");
    }

    #[test]
    fn test_sanitize_accepts_system_theme() {
        let mut config = AppConfig::default();
        config.current_theme = SYSTEM_THEME.to_string();
        config.sanitize();
        assert_eq!(config.current_theme, SYSTEM_THEME);
    }

    #[test]
    fn test_sanitize_run_module_floors() {
        let mut config = AppConfig::default();
        config.run_module.timeout_secs = 0;
        config.run_module.max_output_bytes = 10;
        config.sanitize();
        assert_eq!(config.run_module.timeout_secs, 1);
        assert_eq!(config.run_module.max_output_bytes, 1024);
    }

    #[test]
    fn test_theme_names_start_with_system() {
        let config = AppConfig::default();
        let names = config.theme_names();
        assert_eq!(names[0], "System");
        assert_eq!(names[1], "BluePurple");
        assert_eq!(names.len(), config.themes.len() + 1);
    }

    #[test]
    fn test_resolve_system_theme() {
        let config = AppConfig::default();
        assert_eq!(config.resolve_theme("System", true).name, "Dark");
        assert_eq!(config.resolve_theme("System", false).name, "Light");
        assert_eq!(config.resolve_theme("Reddit", true).name, "Reddit");
        assert_eq!(config.resolve_theme("Nope", true).name, "BluePurple");
    }

    #[test]
    fn test_with_builtins_merged_preserves_custom() {
        let mut custom_dark = builtin_dark();
        custom_dark.panes.body_bg = HexColor::rgb(255, 0, 0);

        let mut config = AppConfig::default();
        config.themes = vec![custom_dark];
        config.with_builtins_merged();

        assert_eq!(config.themes.len(), builtin_themes().len());
        let dark = config.find_theme("Dark").unwrap();
        assert_eq!(dark.panes.body_bg, HexColor::rgb(255, 0, 0));
        assert!(config.find_theme("BluePurple").is_some());
    }

    #[test]
    fn test_run_module_missing_fields_get_defaults() {
        let json = r#"{"run_module": {"enabled": true}}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert!(parsed.run_module.enabled);
        assert_eq!(parsed.run_module.interpreter, "python3");
        assert_eq!(parsed.run_module.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_resolved_session_path_override() {
        let mut config = AppConfig::default();
        assert!(config
            .resolved_session_path()
            .ends_with("codepad-session.redb"));
        config.session_path = "/tmp/elsewhere.redb".to_string();
        assert_eq!(
            config.resolved_session_path(),
            PathBuf::from("/tmp/elsewhere.redb")
        );
    }
}
