use egui::{Color32, Visuals};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("could not parse style sheet: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Editor style sheet. Colors are `[r, g, b]`; anything left out keeps the
/// egui default for the chosen theme.
///
/// ```toml
/// dark = true
/// panel_fill = [30, 30, 34]
/// accent = [90, 140, 220]
/// rounding = 4.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorStyle {
    pub dark: bool,
    pub panel_fill: Option<[u8; 3]>,
    pub window_fill: Option<[u8; 3]>,
    pub text_color: Option<[u8; 3]>,
    pub accent: Option<[u8; 3]>,
    pub rounding: f32,
}

impl Default for EditorStyle {
    fn default() -> Self {
        Self {
            dark: true,
            panel_fill: None,
            window_fill: None,
            text_color: None,
            accent: None,
            rounding: 2.0,
        }
    }
}

impl EditorStyle {
    pub fn parse(style_sheet: &str) -> Result<Self, StyleError> {
        Ok(toml::from_str(style_sheet)?)
    }

    pub fn visuals(&self) -> Visuals {
        let mut visuals = if self.dark { Visuals::dark() } else { Visuals::light() };
        visuals.window_rounding = egui::Rounding::same(self.rounding);
        visuals.window_shadow = egui::epaint::Shadow::NONE;

        if let Some(color) = self.panel_fill {
            visuals.panel_fill = rgb(color);
        }
        if let Some(color) = self.window_fill {
            visuals.window_fill = rgb(color);
        }
        if let Some(color) = self.text_color {
            visuals.override_text_color = Some(rgb(color));
        }
        if let Some(color) = self.accent {
            visuals.selection.bg_fill = rgb(color);
            visuals.hyperlink_color = rgb(color);
        }
        visuals
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}
