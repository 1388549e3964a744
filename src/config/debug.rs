//! Debugging feature flags.
//!
//! Toggle individual diagnostics here. All call sites are additionally gated
//! by `cfg(debug_assertions)`, so release builds stay quiet.

pub struct DebugFlags {
    /// Emit UI interaction logs (date changes, mode switches, reloads).
    pub print_ui_interactions: bool,
    /// Emit how long the CSV took to read and parse.
    pub print_load_timing: bool,
    /// Emit series cache hit/miss diagnostics.
    pub print_cache_events: bool,
    /// Emit when derived dashboard state (view, stats, specs) is rebuilt.
    pub print_recompute_events: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_ui_interactions: true,
    print_load_timing: false,
    print_cache_events: false,
    print_recompute_events: false,
    print_shutdown: false,
};
