use image_hud_engine::{HudOptions, HudToggles, Preset, ResizeMode, TargetFormat, TransformSpec};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid preset: {0}")]
    InvalidPreset(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI language code, `auto` to follow the host.
    pub language: String,
    /// External image editor; empty opens files with the system default app.
    pub editor_app_path: String,
    pub presets: Vec<Preset>,
    pub hud: HudToggles,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            editor_app_path: String::new(),
            presets: default_presets(),
            hud: HudToggles::default(),
        }
    }
}

/// Quick actions offered before the user configures any.
pub fn default_presets() -> Vec<Preset> {
    vec![
        Preset::new(
            "Quick WebP (80%)",
            TransformSpec {
                target_format: TargetFormat::Webp,
                quality: 0.8,
                ..TransformSpec::default()
            },
        ),
        Preset::new(
            "Quick JPG (80%)",
            TransformSpec {
                target_format: TargetFormat::Jpeg,
                quality: 0.8,
                ..TransformSpec::default()
            },
        ),
        Preset::new(
            "Quick Scale 50% (WebP 90%)",
            TransformSpec {
                target_format: TargetFormat::Webp,
                quality: 0.9,
                resize_mode: ResizeMode::Scale,
                resize_value: 0.5,
                ..TransformSpec::default()
            },
        ),
    ]
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Older files without presets get the defaults
        if config.presets.is_empty() {
            config.presets = default_presets();
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads the config, falling back to defaults when there is no file.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/image-hud");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Appends a preset after checking it has a name and a valid transform.
    pub fn add_preset(&mut self, preset: Preset) -> Result<(), ConfigError> {
        if preset.name.trim().is_empty() {
            return Err(ConfigError::InvalidPreset("name is required".to_string()));
        }
        preset
            .spec
            .validate()
            .map_err(|e| ConfigError::InvalidPreset(format!("{}: {e}", preset.name)))?;
        self.presets.push(preset);
        Ok(())
    }

    pub fn remove_preset(&mut self, index: usize) -> Option<Preset> {
        (index < self.presets.len()).then(|| self.presets.remove(index))
    }

    pub fn reset_presets(&mut self) {
        self.presets = default_presets();
    }

    /// Read-only settings view handed to the HUD engine.
    pub fn hud_options(&self) -> HudOptions {
        let editor = self.editor_app_path.trim();
        let editor_app_path = (!editor.is_empty())
            .then(|| Self::expand_path(Path::new(editor)).unwrap_or_else(|| PathBuf::from(editor)));
        HudOptions {
            toggles: self.hud,
            presets: self.presets.clone(),
            editor_app_path,
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/image-hud/config.toml"));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.language, "auto");
        assert_eq!(config.editor_app_path, "");
        assert_eq!(config.hud, HudToggles::default());
        let names: Vec<_> = config.presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Quick WebP (80%)", "Quick JPG (80%)", "Quick Scale 50% (WebP 90%)"]
        );
        assert_eq!(
            config.presets[2].describe(),
            "WEBP | 90% Quality | Scale Percentage 50%"
        );
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut original = Config {
            language: "zh".to_string(),
            editor_app_path: "/Applications/Preview.app".to_string(),
            ..Config::default()
        };
        original.hud.show_btn_copy = false;
        original.presets[0].spec.delete_original = true;

        let toml_str = toml::to_string_pretty(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            editor_app_path: "/usr/bin/gimp".to_string(),
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            r#"
editor_app_path = "/usr/bin/krita"

[hud]
show_dimensions = false
"#,
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.language, "auto");
        assert_eq!(config.presets, default_presets());
        assert!(!config.hud.show_dimensions);
        assert!(config.hud.show_file_size);
    }

    #[test]
    fn test_presets_in_toml() {
        let config_content = r#"
[[presets]]
name = "Tiny"
target_format = "jpeg"
quality = 0.5
resize_mode = "fixed_width"
resize_value = 320.0
use_md5 = true
"#;

        let config: Config = toml::from_str(config_content).unwrap();
        assert_eq!(config.presets.len(), 1);
        let spec = &config.presets[0].spec;
        assert_eq!(spec.target_format, TargetFormat::Jpeg);
        assert_eq!(spec.resize_mode, ResizeMode::FixedWidth);
        assert_eq!(spec.resize_value, 320.0);
        assert!(spec.use_content_hash);
        assert!(!spec.delete_original);
    }

    #[test]
    fn test_empty_preset_list_is_migrated() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "presets = []\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.presets, default_presets());
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "presets = 7").unwrap();

        let result = Config::load_from_path(&config_file);
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_add_preset_validates() {
        let mut config = Config::default();

        let unnamed = Preset::new("  ", TransformSpec::default());
        assert!(matches!(
            config.add_preset(unnamed),
            Err(ConfigError::InvalidPreset(_))
        ));

        let bad_scale = Preset::new(
            "Huge",
            TransformSpec {
                resize_mode: ResizeMode::Scale,
                resize_value: 2.0,
                ..TransformSpec::default()
            },
        );
        assert!(matches!(
            config.add_preset(bad_scale),
            Err(ConfigError::InvalidPreset(_))
        ));

        let good = Preset::new(
            "Thumb",
            TransformSpec::default().with_resize_mode(ResizeMode::FixedWidth),
        );
        config.add_preset(good).unwrap();
        assert_eq!(config.presets.len(), 4);
        assert_eq!(config.presets[3].spec.resize_value, 800.0);
    }

    #[test]
    fn test_remove_and_reset_presets() {
        let mut config = Config::default();
        let removed = config.remove_preset(1).unwrap();
        assert_eq!(removed.name, "Quick JPG (80%)");
        assert_eq!(config.presets.len(), 2);
        assert!(config.remove_preset(10).is_none());

        config.reset_presets();
        assert_eq!(config.presets, default_presets());
    }

    #[test]
    fn test_hud_options_expand_editor_path() {
        unsafe {
            env::set_var("IMAGE_HUD_TEST_EDITORS", "/opt/editors");
        }

        let config = Config {
            editor_app_path: "$IMAGE_HUD_TEST_EDITORS/krita".to_string(),
            ..Config::default()
        };
        let options = config.hud_options();
        assert_eq!(
            options.editor_app_path,
            Some(PathBuf::from("/opt/editors/krita"))
        );
        assert_eq!(options.presets, config.presets);
        assert_eq!(options.toggles, config.hud);

        unsafe {
            env::remove_var("IMAGE_HUD_TEST_EDITORS");
        }
    }

    #[test]
    fn test_hud_options_blank_editor_means_default_app() {
        let config = Config {
            editor_app_path: "   ".to_string(),
            ..Config::default()
        };
        assert_eq!(config.hud_options().editor_app_path, None);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(&PathBuf::from("~/bin/editor")).unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("bin/editor"));
    }
}
