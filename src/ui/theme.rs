use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Colours used by the widget. Lives under `[theme]` in `config.toml`;
/// any colour left out falls back to the default palette.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub subtext: Color,
    pub accent: Color,
    pub red: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),
            surface: Color::Rgb(49, 50, 68),
            overlay: Color::Rgb(108, 112, 134),
            text: Color::Rgb(205, 214, 244),
            subtext: Color::Rgb(166, 173, 200),
            // Spotify green
            accent: Color::Rgb(30, 215, 96),
            red: Color::Rgb(243, 139, 168),
        }
    }
}
