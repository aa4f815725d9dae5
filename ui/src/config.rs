//! Layout configuration loaded from JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::context::UiContext;
use crate::error::UiError;
use crate::layout::{Alignment, Direction, FlowLayout};
use crate::style::ThemeOverrides;

/// Flow parameters plus presentation settings. Missing keys take the
/// defaults of `FlowLayout::default()` and `UiContext::new()`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: Direction,
    pub spacing: f32,
    pub alignment: Alignment,
    pub font_size: f32,
    pub theme: ThemeOverrides,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            direction: Direction::Horizontal,
            spacing: 5.0,
            alignment: Alignment::Start,
            font_size: 16.0,
            theme: ThemeOverrides::default(),
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self, UiError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, UiError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| UiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        tracing::debug!(path = %path.display(), ?config, "loaded layout config");
        Ok(config)
    }

    /// An empty flow layout with the configured parameters.
    pub fn build_layout(&self) -> FlowLayout {
        FlowLayout::new(self.direction, self.spacing, self.alignment)
    }

    /// Apply font size and theme overrides to `ctx`.
    pub fn apply(&self, ctx: &mut UiContext) {
        ctx.font_size = self.font_size;
        self.theme.apply(&mut ctx.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::Color;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = LayoutConfig::from_json(r#"{ "alignment": "center" }"#).unwrap();
        assert_eq!(config.alignment, Alignment::Center);
        assert_eq!(config.direction, Direction::Horizontal);
        assert_eq!(config.spacing, 5.0);
        assert_eq!(config.font_size, 16.0);
    }

    #[test]
    fn test_negative_spacing_is_clamped_by_layout() {
        let config =
            LayoutConfig::from_json(r#"{ "direction": "vertical", "spacing": -4 }"#).unwrap();
        let layout = config.build_layout();
        assert_eq!(layout.direction(), Direction::Vertical);
        assert_eq!(layout.spacing(), 0.0);
    }

    #[test]
    fn test_unknown_alignment_is_rejected() {
        let err = LayoutConfig::from_json(r#"{ "alignment": "justify" }"#).unwrap_err();
        assert!(matches!(err, UiError::Config(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = LayoutConfig::load("does/not/exist.json").unwrap_err();
        match err {
            UiError::Io { path, .. } => assert_eq!(path, Path::new("does/not/exist.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_apply_sets_font_and_theme() {
        let config = LayoutConfig::from_json(
            r#"{ "font_size": 12, "theme": { "window_bg": { "r": 1, "g": 2, "b": 3 } } }"#,
        )
        .unwrap();
        let mut ctx = UiContext::new();
        config.apply(&mut ctx);
        assert_eq!(ctx.font_size, 12.0);
        assert_eq!(ctx.theme.window_bg, Color::from_rgba(1, 2, 3, 255));
    }
}
