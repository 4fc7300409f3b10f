//! Theme and styling
//!
//! Two palettes: the default dark theme and a high-contrast black/yellow
//! theme selected from the accessibility settings.

use crate::sim::ConfidenceLevel;
use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Vec2, Visuals};

/// Application theme configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Primary accent color
    pub primary: Color32,
    /// Secondary accent color
    pub secondary: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    /// Microphone ring while listening
    pub listening: Color32,

    /// Map room fill
    pub map_room: Color32,
    /// Map highlight for the selected room and path
    pub map_selected: Color32,

    pub button_rounding: Rounding,
    pub card_rounding: Rounding,

    pub spacing: f32,
    pub spacing_lg: f32,
    pub spacing_sm: f32,

    /// Body text size
    pub text_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(37, 99, 235),    // Blue
            secondary: Color32::from_rgb(147, 51, 234), // Purple
            success: Color32::from_rgb(16, 185, 129),   // Emerald
            warning: Color32::from_rgb(245, 158, 11),   // Amber
            error: Color32::from_rgb(220, 38, 38),      // Red

            bg_primary: Color32::from_rgb(15, 23, 42),   // Slate 900
            bg_secondary: Color32::from_rgb(30, 41, 59), // Slate 800
            bg_tertiary: Color32::from_rgb(51, 65, 85),  // Slate 700

            text_primary: Color32::from_rgb(255, 255, 255),
            text_secondary: Color32::from_rgb(203, 213, 225),
            text_muted: Color32::from_rgb(148, 163, 184),

            listening: Color32::from_rgb(220, 38, 38),

            map_room: Color32::from_rgba_unmultiplied(59, 130, 246, 70),
            map_selected: Color32::from_rgb(250, 204, 21),

            button_rounding: Rounding::same(8.0),
            card_rounding: Rounding::same(12.0),

            spacing: 16.0,
            spacing_lg: 24.0,
            spacing_sm: 8.0,

            text_size: 15.0,
        }
    }

    /// Black background, yellow text
    pub fn high_contrast() -> Self {
        let yellow = Color32::from_rgb(253, 224, 71);
        Self {
            primary: yellow,
            secondary: Color32::WHITE,
            success: Color32::from_rgb(74, 222, 128),
            warning: Color32::from_rgb(251, 146, 60),
            error: Color32::from_rgb(248, 113, 113),

            bg_primary: Color32::BLACK,
            bg_secondary: Color32::BLACK,
            bg_tertiary: Color32::from_rgb(38, 38, 38),

            text_primary: yellow,
            text_secondary: yellow,
            text_muted: Color32::from_rgb(254, 240, 138),

            listening: Color32::from_rgb(248, 113, 113),

            map_room: Color32::from_rgb(38, 38, 38),
            map_selected: Color32::WHITE,

            button_rounding: Rounding::same(4.0),
            card_rounding: Rounding::same(6.0),

            spacing: 16.0,
            spacing_lg: 24.0,
            spacing_sm: 8.0,

            text_size: 17.0,
        }
    }

    pub fn for_contrast(high_contrast: bool) -> Self {
        if high_contrast {
            Self::high_contrast()
        } else {
            Self::dark()
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;
        visuals.extreme_bg_color = self.bg_tertiary;
        visuals.override_text_color = Some(self.text_primary);

        visuals.widgets.noninteractive.bg_fill = self.bg_secondary;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_muted);

        visuals.widgets.inactive.bg_fill = self.bg_tertiary;
        visuals.widgets.inactive.weak_bg_fill = self.bg_tertiary;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        visuals.widgets.hovered.bg_fill = self.primary.gamma_multiply(0.8);
        visuals.widgets.hovered.weak_bg_fill = self.primary.gamma_multiply(0.8);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.active.bg_fill = self.primary;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.selection.bg_fill = self.primary.gamma_multiply(0.5);
        visuals.selection.stroke = Stroke::new(1.0, self.primary);

        visuals.window_rounding = self.card_rounding;
        visuals.window_stroke = Stroke::new(1.0, self.bg_tertiary);

        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::splat(self.spacing_sm);
        style.spacing.window_margin = egui::Margin::same(self.spacing);
        style.spacing.button_padding = Vec2::new(self.spacing, self.spacing_sm);

        style.text_styles.insert(
            egui::TextStyle::Heading,
            FontId::new(24.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            FontId::new(self.text_size, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            FontId::new(self.text_size, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Small,
            FontId::new(12.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
    }

    /// Text color for a confidence band
    pub fn confidence(&self, level: ConfidenceLevel) -> Color32 {
        match level {
            ConfidenceLevel::High => self.success,
            ConfidenceLevel::Medium => self.warning,
            ConfidenceLevel::Low => self.error,
        }
    }

    /// Card frame used by panels
    pub fn card(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.bg_secondary)
            .rounding(self.card_rounding)
            .inner_margin(self.spacing)
            .stroke(Stroke::new(1.0, self.bg_tertiary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contrast_selection() {
        assert_eq!(Theme::for_contrast(false), Theme::dark());
        let hc = Theme::for_contrast(true);
        assert_eq!(hc.bg_primary, Color32::BLACK);
        assert_eq!(hc.text_primary, Color32::from_rgb(253, 224, 71));
    }
}
