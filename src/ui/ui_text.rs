//! Every user-facing string of the dashboard.

pub struct UiText {
    pub window_title: &'static str,
    pub app_title: &'static str,
    pub app_subtitle: &'static str,
    pub app_description: &'static str,

    // Filters
    pub filters_heading: &'static str,
    pub period_label: &'static str,
    pub single_day_label: &'static str,
    pub start_date_label: &'static str,
    pub end_date_label: &'static str,
    pub day_label: &'static str,
    pub selected_days_prefix: &'static str,
    pub calendar_days_suffix: &'static str,
    pub inverted_range_warning: &'static str,
    pub reset_button: &'static str,
    pub reload_button: &'static str,

    // Metrics
    pub stats_heading: &'static str,
    pub metric_min_close: &'static str,
    pub metric_max_close: &'static str,
    pub metric_total_volume: &'static str,
    pub no_data: &'static str,

    // Charts
    pub price_chart_heading: &'static str,
    pub volume_price_heading: &'static str,
    pub view_mode_label: &'static str,
    pub view_mode_scatter: &'static str,
    pub view_mode_dual_axis: &'static str,
    pub empty_chart: &'static str,

    // Table
    pub preview_heading: &'static str,
    pub preview_truncated_prefix: &'static str,

    // Status / errors
    pub load_failed_heading: &'static str,
    pub load_failed_hint: &'static str,
    pub status_file_label: &'static str,
    pub status_rows_label: &'static str,
    pub status_span_label: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    window_title: "Bitcoin Explorer",
    app_title: "📈 Bitcoin exploration",
    app_subtitle: "Exploratory and temporal analysis of historical Bitcoin data",
    app_description: "Explore how the Bitcoin price evolves and how price relates to traded volume, with date filters.",

    filters_heading: "⚙ Filters",
    period_label: "Period to analyse",
    single_day_label: "Single day",
    start_date_label: "Start",
    end_date_label: "End",
    day_label: "Day",
    selected_days_prefix: "Selected days:",
    calendar_days_suffix: "calendar days in range",
    inverted_range_warning: "Start is after end: nothing selected",
    reset_button: "Full period",
    reload_button: "⟳ Reload file",

    stats_heading: "📊 Quick statistics for the selected period",
    metric_min_close: "Minimum price (Close)",
    metric_max_close: "Maximum price (Close)",
    metric_total_volume: "Total volume",
    no_data: "No data",

    price_chart_heading: "📉 Price curve (Close)",
    volume_price_heading: "📊 Volume / Price relationship",
    view_mode_label: "Volume/price view:",
    view_mode_scatter: "Scatter (Volume vs Close)",
    view_mode_dual_axis: "Synchronised curves (Price & Volume)",
    empty_chart: "No rows in the selected period",

    preview_heading: "Show filtered data",
    preview_truncated_prefix: "Showing the first",

    load_failed_heading: "Could not load the data file",
    load_failed_hint: "Fix the file (or pass --data <PATH>) and press Reload.",
    status_file_label: "File",
    status_rows_label: "Rows",
    status_span_label: "Span",
};
