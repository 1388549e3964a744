use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::field::Field;
use crate::utils::time_utils::datetime_to_plot_x;

#[derive(Debug, PartialEq)]
pub enum CandleType {
    Bullish,
    Bearish,
}

/// One daily record of the normalized series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Candle {
    pub timestamp: NaiveDateTime,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        timestamp: NaiveDateTime,
        open_price: f64,
        high_price: f64,
        low_price: f64,
        close_price: f64,
        volume: f64,
    ) -> Self {
        Candle {
            timestamp,
            open_price,
            high_price,
            low_price,
            close_price,
            volume,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn get_type(&self) -> CandleType {
        if self.close_price >= self.open_price {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    /// Numeric value of a schema field. Timestamps come back as plot x
    /// coordinates (days since epoch).
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Timestamp => datetime_to_plot_x(self.timestamp),
            Field::Open => self.open_price,
            Field::High => self.high_price,
            Field::Low => self.low_price,
            Field::Close => self.close_price,
            Field::Volume => self.volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candle_type_and_values() {
        let ts = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let up = Candle::new(ts, 29000.0, 30500.0, 28800.0, 30000.0, 100.0);
        assert_eq!(up.get_type(), CandleType::Bullish);
        assert_eq!(up.value(Field::Close), 30000.0);
        assert_eq!(up.value(Field::Volume), 100.0);
        assert_eq!(up.date(), NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());

        let down = Candle::new(ts, 31000.0, 31500.0, 29800.0, 30000.0, 100.0);
        assert_eq!(down.get_type(), CandleType::Bearish);
    }
}
