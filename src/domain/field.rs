//! The normalized column schema every consumer of a loaded series relies on.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, EnumIter, Display,
)]
pub enum Field {
    Timestamp,
    Open,
    High,
    Low,
    Close,
    Volume,
}

/// How a field is interpreted on an axis or in a tooltip.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Temporal,
    Quantitative,
}

impl Field {
    /// Columns every input file must provide besides the timestamp.
    pub const VALUE_COLUMNS: [Field; 5] = [
        Field::Open,
        Field::High,
        Field::Low,
        Field::Close,
        Field::Volume,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Timestamp => "Timestamp",
            Field::Open => "Open",
            Field::High => "High",
            Field::Low => "Low",
            Field::Close => "Close",
            Field::Volume => "Volume",
        }
    }

    pub fn data_type(&self) -> FieldType {
        match self {
            Field::Timestamp => FieldType::Temporal,
            _ => FieldType::Quantitative,
        }
    }

    pub fn is_price(&self) -> bool {
        matches!(self, Field::Open | Field::High | Field::Low | Field::Close)
    }
}
