use macroquad::prelude::Color;
use serde::Deserialize;

/// Visual theme colors for UI widgets.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Primary text color
    pub text_color: Color,
    /// Background color for buttons
    pub button_bg: Color,
    /// Background color for hovered buttons
    pub button_hover_bg: Color,
    /// Background color for panels and text inputs
    pub panel_bg: Color,
    /// Fallback window/background color
    pub window_bg: Color,
    pub focus_border: Color,
    pub panel_border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            text_color: Color::from_rgba(255, 255, 255, 255), // white
            button_bg: Color::from_rgba(40, 40, 40, 200),     // dark grey
            button_hover_bg: Color::from_rgba(60, 60, 60, 200), // lighter grey
            panel_bg: Color::from_rgba(20, 20, 20, 220),      // almost black
            window_bg: Color::from_rgba(0, 0, 0, 255),        // black
            focus_border: Color::from_rgba(90, 140, 220, 255),
            panel_border: Color::from_rgba(50, 50, 50, 255),
        }
    }
}

/// 8-bit RGBA color as it appears in config files.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl From<RgbaColor> for Color {
    fn from(c: RgbaColor) -> Self {
        Color::from_rgba(c.r, c.g, c.b, c.a)
    }
}

/// Partial theme; only the colors that are present replace the theme's.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ThemeOverrides {
    pub text_color: Option<RgbaColor>,
    pub button_bg: Option<RgbaColor>,
    pub button_hover_bg: Option<RgbaColor>,
    pub panel_bg: Option<RgbaColor>,
    pub window_bg: Option<RgbaColor>,
    pub focus_border: Option<RgbaColor>,
    pub panel_border: Option<RgbaColor>,
}

impl ThemeOverrides {
    pub fn apply(&self, theme: &mut Theme) {
        let slots = [
            (self.text_color, &mut theme.text_color),
            (self.button_bg, &mut theme.button_bg),
            (self.button_hover_bg, &mut theme.button_hover_bg),
            (self.panel_bg, &mut theme.panel_bg),
            (self.window_bg, &mut theme.window_bg),
            (self.focus_border, &mut theme.focus_border),
            (self.panel_border, &mut theme.panel_border),
        ];
        for (color, slot) in slots {
            if let Some(color) = color {
                *slot = color.into();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_only_replace_present_colors() {
        let mut theme = Theme::default();
        let overrides = ThemeOverrides {
            button_bg: Some(RgbaColor { r: 10, g: 20, b: 30, a: 255 }),
            ..Default::default()
        };

        overrides.apply(&mut theme);

        assert_eq!(theme.button_bg, Color::from_rgba(10, 20, 30, 255));
        assert_eq!(theme.text_color, Theme::default().text_color);
        assert_eq!(theme.window_bg, Theme::default().window_bg);
    }

    #[test]
    fn test_alpha_defaults_to_opaque() {
        let color: RgbaColor = serde_json::from_str(r#"{ "r": 1, "g": 2, "b": 3 }"#).unwrap();
        assert_eq!(color.a, 255);
    }
}
