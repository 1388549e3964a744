// Data loading and caching
pub mod cache;
pub mod error;
pub mod loader;

// Re-export commonly used types
pub use cache::SeriesCache;
pub use error::LoadError;
pub use loader::{ColumnLayout, load_series, normalize_columns, parse_timestamp};
