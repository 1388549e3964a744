use eframe::egui::{Context, RichText, Ui, Visuals};

use crate::domain::candle::Candle;
use crate::domain::field::Field;
use crate::ui::config::UI_CONFIG;
use crate::utils::time_utils::format_datetime;

/// Creates a colored heading with uppercase text and monospace font
pub fn colored_heading(text: impl Into<String>) -> RichText {
    let uppercase_text = text.into().to_uppercase();
    RichText::new(uppercase_text)
        .color(UI_CONFIG.colors.heading)
        .monospace()
}

/// Creates a colored sub-section heading using the configured label color
pub fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Creates a section heading with standard spacing
pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(10.0);
    ui.heading(colored_heading(text));
    ui.add_space(5.0);
}

/// Creates a separator with standard spacing
pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Inserts `,` between groups of three digits of an integer string.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rounds to an integer and groups thousands: `1234567.8` -> `1,234,568`.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_digits(&digits))
}

/// Price metric: two decimals followed by the currency, e.g. `30000.00 $`.
pub fn format_usd(price: f64) -> String {
    format!("{:.2} $", price)
}

/// Total volume metric: thousands-grouped integer.
pub fn format_volume(volume: f64) -> String {
    format_thousands(volume)
}

/// Compact axis label (`1.2M`, `35.0k`, `950`).
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

/// Display form of one field of a record (tooltips and the preview table).
pub fn format_field_value(candle: &Candle, field: Field) -> String {
    match field {
        Field::Timestamp => format_datetime(candle.timestamp),
        // Same grouping as the Total Volume metric
        Field::Volume => format_volume(candle.volume),
        price => format!("{:.2}", candle.value(price)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(250.0), "250");
        assert_eq!(format_thousands(1234.4), "1,234");
        assert_eq!(format_thousands(1234567.8), "1,234,568");
        assert_eq!(format_thousands(-98765.0), "-98,765");
        assert_eq!(format_thousands(100000.0), "100,000");
    }

    #[test]
    fn test_format_usd_two_decimals() {
        assert_eq!(format_usd(30000.0), "30000.00 $");
        assert_eq!(format_usd(31999.999), "32000.00 $");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(950.0), "950");
        assert_eq!(format_compact(35_000.0), "35.0k");
        assert_eq!(format_compact(1_240_000.0), "1.2M");
        assert_eq!(format_compact(3_000_000_000.0), "3.0B");
    }

    #[test]
    fn test_format_field_value() {
        let ts = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let candle = Candle::new(ts, 1.0, 2.0, 0.5, 1.5, 1234.4);
        assert_eq!(format_field_value(&candle, Field::Timestamp), "2021-01-01 00:00:00");
        assert_eq!(format_field_value(&candle, Field::High), "2.00");
        assert_eq!(format_field_value(&candle, Field::Volume), "1,234");
        assert_eq!(
            format_field_value(&candle, Field::Volume),
            format_volume(candle.volume)
        );

        let heavy = Candle::new(ts, 1.0, 2.0, 0.5, 1.5, 1_234_567.0);
        assert_eq!(format_field_value(&heavy, Field::Volume), "1,234,567");
    }
}
