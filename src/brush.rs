use egui::Color32;
use serde::{Deserialize, Serialize};

/// Current freehand drawing settings: stroke color and line width.
///
/// Mutated only by the color and width controls. The width control carries
/// raw text input; anything that is not a positive integer falls back to 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrushSettings {
    pub color: Color32,
    pub line_width: u32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            line_width: 1,
        }
    }
}

impl BrushSettings {
    /// Parse a raw width input. Invalid or non-positive values become 1.
    pub fn parse_line_width(raw: &str) -> u32 {
        raw.trim().parse().ok().filter(|w| *w > 0).unwrap_or(1)
    }

    pub fn set_line_width_input(&mut self, raw: &str) {
        self.line_width = Self::parse_line_width(raw);
    }

    pub fn width_px(&self) -> f32 {
        self.line_width as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_parses_positive_integers() {
        assert_eq!(BrushSettings::parse_line_width("7"), 7);
        assert_eq!(BrushSettings::parse_line_width(" 12 "), 12);
    }

    #[test]
    fn invalid_width_falls_back_to_one() {
        assert_eq!(BrushSettings::parse_line_width("abc"), 1);
        assert_eq!(BrushSettings::parse_line_width(""), 1);
        assert_eq!(BrushSettings::parse_line_width("0"), 1);
        assert_eq!(BrushSettings::parse_line_width("-4"), 1);
        assert_eq!(BrushSettings::parse_line_width("3.5"), 1);
    }
}
