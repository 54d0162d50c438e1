use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::InspectorError;
use crate::session::SessionOptions;

/// Inspector configuration, read once at startup.
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct InspectorSettings {
    /// Fold state of groups the first time they appear
    pub default_expanded: bool,
    /// Poll the selection for structural changes every frame
    pub poll_every_tick: bool,
    /// How deep reflected values are expanded into property nodes
    pub max_depth: usize,
    /// Elements of a list, array, map or set turned into property nodes
    pub max_collection_items: usize,
    /// Type paths drawn by a dedicated editor instead of generic reflection
    pub custom_drawer_types: Vec<String>,
    /// Component type path prefixes never shown in the inspector
    pub hidden_component_prefixes: Vec<String>,
}

impl Default for InspectorSettings {
    fn default() -> Self {
        Self {
            default_expanded: true,
            poll_every_tick: true,
            max_depth: 8,
            max_collection_items: 32,
            custom_drawer_types: vec![
                "bevy_transform::components::transform::Transform".to_string(),
                "glam::Vec3".to_string(),
                "glam::Quat".to_string(),
                "bevy_color::color::Color".to_string(),
            ],
            hidden_component_prefixes: vec!["bevy_searchable_inspector::selection::".to_string()],
        }
    }
}

impl InspectorSettings {
    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("bevy_searchable_inspector");
            p.push("inspector.ron");
            p
        })
    }

    /// Load settings from the config directory, or return defaults
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                error!("{e}");
                Self::default()
            }
        }
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, InspectorError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(InspectorError::Settings {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        };

        let settings = Self::from_ron(&content).map_err(|message| InspectorError::Settings {
            path: path.to_path_buf(),
            message,
        })?;
        info!("Inspector settings loaded from: {:?}", path);
        Ok(settings)
    }

    pub fn from_ron(content: &str) -> Result<Self, String> {
        ron::from_str(content).map_err(|e| e.to_string())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            default_expanded: self.default_expanded,
            poll_every_tick: self.poll_every_tick,
        }
    }

    pub fn is_custom_drawer(&self, type_path: &str) -> bool {
        self.custom_drawer_types.iter().any(|t| t == type_path)
    }

    pub fn is_hidden_component(&self, type_path: &str) -> bool {
        self.hidden_component_prefixes
            .iter()
            .any(|prefix| type_path.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = InspectorSettings::from_ron("(default_expanded: false, max_depth: 3)").unwrap();
        assert!(!settings.default_expanded);
        assert_eq!(settings.max_depth, 3);
        assert_eq!(settings.max_collection_items, 32);
        assert!(settings.poll_every_tick);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(InspectorSettings::from_ron("(max_depth: \"deep\")").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("bevy_searchable_inspector_missing/inspector.ron");
        assert_eq!(InspectorSettings::load_from(&path), Ok(InspectorSettings::default()));
    }

    #[test]
    fn hidden_prefixes_and_custom_drawers() {
        let settings = InspectorSettings::default();
        assert!(settings.is_hidden_component("bevy_searchable_inspector::selection::Selected"));
        assert!(!settings.is_hidden_component("bevy_transform::components::transform::Transform"));
        assert!(settings.is_custom_drawer("glam::Vec3"));
        assert!(!settings.is_custom_drawer("glam::Vec2"));
    }

    #[test]
    fn session_options_follow_settings() {
        let settings = InspectorSettings {
            default_expanded: false,
            poll_every_tick: false,
            ..Default::default()
        };
        let options = settings.session_options();
        assert!(!options.default_expanded);
        assert!(!options.poll_every_tick);
    }
}
