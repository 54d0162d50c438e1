//! Error types for the inspector core.
//!
//! None of these are fatal to the tool. They are attached to the single group
//! they concern, or logged and skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Conditions that can occur while grouping, filtering or editing components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectorError {
    /// A cached entity or component was destroyed between polls.
    #[error("stale reference: {what} no longer exists")]
    StaleReference { what: String },

    /// The component type cannot combine several targets into one editor.
    #[error("Multi-object editing not supported. {type_name} cannot edit {targets} objects at once")]
    UnsupportedMultiEdit { type_name: String, targets: usize },

    /// The component type has no reflection data, so no property tree exists.
    #[error("{type_name} is not registered for reflection")]
    NotReflected { type_name: String },

    /// The component is immutable and may only be replaced, never edited in place.
    #[error("{type_name} is immutable")]
    ReadOnly { type_name: String },

    /// The settings file exists but could not be parsed.
    #[error("failed to parse settings {path}: {message}")]
    Settings { path: PathBuf, message: String },
}

impl InspectorError {
    pub fn stale(what: impl Into<String>) -> Self {
        Self::StaleReference { what: what.into() }
    }

    /// Whether this condition should be shown to the user as an advisory notice
    /// rather than silently dropped.
    pub fn is_notice(&self) -> bool {
        matches!(
            self,
            InspectorError::UnsupportedMultiEdit { .. } | InspectorError::NotReflected { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_multi_edit_reads_like_the_advisory() {
        let err = InspectorError::UnsupportedMultiEdit {
            type_name: "Script".to_string(),
            targets: 3,
        };
        assert!(err.to_string().starts_with("Multi-object editing not supported."));
        assert!(err.is_notice());
    }

    #[test]
    fn stale_references_are_not_notices() {
        assert!(!InspectorError::stale("Entity 4v1").is_notice());
    }
}
