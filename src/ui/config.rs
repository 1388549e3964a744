use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub metric_value: Color32,
    pub bullish: Color32,
    pub bearish: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_min_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::YELLOW,
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(27, 27, 32),
        side_panel: Color32::from_rgb(25, 25, 25),
        metric_value: Color32::from_rgb(240, 240, 240),
        bullish: Color32::from_rgb(130, 200, 140),
        bearish: Color32::from_rgb(230, 120, 120),
    },
    side_panel_min_width: 220.0,
};
