//! Configuration module for the explorer.

pub mod chart;
pub mod dashboard;

mod debug; // Private: use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod persistence;
pub mod plot;

// Re-export commonly used items
pub use chart::CHART;
pub use dashboard::DASHBOARD;
pub use persistence::PERSISTENCE;
pub use plot::PLOT_CONFIG;
