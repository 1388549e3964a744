//! File locations

pub struct DataFileConfig {
    /// Default location of the daily OHLCV file (relative to the working directory)
    pub default_path: &'static str,
}

pub struct PersistenceConfig {
    pub data: DataFileConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    data: DataFileConfig {
        default_path: "btc_daily.csv",
    },
};
