// Domain types and value objects
pub mod candle;
pub mod date_selection;
pub mod field;

// Re-export commonly used types
pub use candle::{Candle, CandleType};
pub use date_selection::{DateRange, DateSelection};
pub use field::{Field, FieldType};
