//! Theme and styling for the GUI
//!
//! Light palette: pale page background, white cards, blue primary action,
//! green/red message boxes.

use eframe::egui;

#[derive(Clone, Copy)]
pub struct AppTheme {
    // Base colors
    pub background: egui::Color32,
    pub card: egui::Color32,
    pub border: egui::Color32,
    pub text_heading: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,

    // Semantic colors
    pub primary: egui::Color32,
    pub primary_hover: egui::Color32,
    pub disabled: egui::Color32,
    pub link: egui::Color32,
    pub success_fill: egui::Color32,
    pub success_border: egui::Color32,
    pub success_text: egui::Color32,
    pub error_fill: egui::Color32,
    pub error_border: egui::Color32,
    pub error_text: egui::Color32,
    pub warning: egui::Color32,
    pub list_fill: egui::Color32,

    // Spacing
    pub spacing_xs: f32,
    pub spacing_sm: f32,
    pub spacing_md: f32,
    pub spacing_lg: f32,

    pub content_width: f32,
    pub button_large: egui::Vec2,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            background: egui::Color32::from_rgb(0xf4, 0xf7, 0xf9),
            card: egui::Color32::WHITE,
            border: egui::Color32::from_rgb(0xe0, 0xe0, 0xe0),
            text_heading: egui::Color32::from_rgb(0x1a, 0x20, 0x2c),
            text_primary: egui::Color32::from_rgb(0x33, 0x33, 0x33),
            text_secondary: egui::Color32::from_rgb(0x4a, 0x55, 0x68),

            primary: egui::Color32::from_rgb(0x31, 0x82, 0xce),
            primary_hover: egui::Color32::from_rgb(0x2b, 0x6c, 0xb0),
            disabled: egui::Color32::from_rgb(0xa0, 0xae, 0xc0),
            link: egui::Color32::from_rgb(0x2b, 0x6c, 0xb0),
            success_fill: egui::Color32::from_rgb(0xf0, 0xff, 0xf4),
            success_border: egui::Color32::from_rgb(0x9a, 0xe6, 0xb4),
            success_text: egui::Color32::from_rgb(0x2f, 0x85, 0x5a),
            error_fill: egui::Color32::from_rgb(0xff, 0xf5, 0xf5),
            error_border: egui::Color32::from_rgb(0xfe, 0xb2, 0xb2),
            error_text: egui::Color32::from_rgb(0xc5, 0x30, 0x30),
            warning: egui::Color32::from_rgb(0xb7, 0x79, 0x1f),
            list_fill: egui::Color32::from_rgb(0xfa, 0xfa, 0xfa),

            spacing_xs: 4.0,
            spacing_sm: 8.0,
            spacing_md: 16.0,
            spacing_lg: 24.0,

            content_width: 600.0,
            button_large: egui::vec2(240.0, 40.0),
        }
    }
}

impl AppTheme {
    /// Filled primary action button; greyed out when `enabled` is false
    pub fn button_primary(&self, text: &str, enabled: bool) -> egui::Button<'_> {
        let fill = if enabled { self.primary } else { self.disabled };
        egui::Button::new(egui::RichText::new(text).color(egui::Color32::WHITE).strong())
            .fill(fill)
            .rounding(8.0)
            .min_size(self.button_large)
    }

    pub fn button_secondary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.primary))
            .fill(self.card)
            .stroke(egui::Stroke::new(1.0, self.primary))
            .rounding(8.0)
    }

    /// White rounded card
    pub fn frame_card(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.card)
            .rounding(12.0)
            .inner_margin(self.spacing_lg)
            .stroke(egui::Stroke::new(1.0, self.border))
    }

    pub fn frame_success(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.success_fill)
            .rounding(8.0)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.0, self.success_border))
    }

    pub fn frame_error(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.error_fill)
            .rounding(8.0)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.0, self.error_border))
    }

    pub fn frame_list(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.list_fill)
            .rounding(8.0)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.0, self.border))
    }
}

/// Configure the egui context style with the given theme
pub fn configure_style(ctx: &egui::Context, theme: &AppTheme) {
    let mut visuals = egui::Visuals::light();
    visuals.window_fill = theme.card;
    visuals.panel_fill = theme.background;
    visuals.override_text_color = Some(theme.text_primary);
    visuals.hyperlink_color = theme.link;
    visuals.selection.bg_fill = theme.primary.linear_multiply(0.3);

    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(0xcb, 0xd5, 0xe0));
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, theme.primary);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(2.0, theme.primary);
    visuals.widgets.hovered.weak_bg_fill = theme.primary_hover;
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(16.0, 10.0);
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(26.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(15.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Monospace,
        egui::FontId::new(13.0, egui::FontFamily::Monospace),
    );
    ctx.set_style(style);
}
