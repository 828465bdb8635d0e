use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub sources: SourcesConfig,
    pub filter: FilterConfig,
    pub features: FeatureConfig,
    pub output: OutputConfig,
}

/// Report pages to download.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourcesConfig {
    pub urls: Vec<String>,
}

/// Allow-list of instrument names, matched exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    pub instruments: Vec<String>,
}

/// How rolling and percentile statistics group rows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Partition {
    /// One series over the whole sorted table, instruments blended.
    Table,
    /// Separate series per instrument, row order preserved.
    #[default]
    Instrument,
}

impl std::str::FromStr for Partition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "all" => Ok(Partition::Table),
            "instrument" | "instruments" => Ok(Partition::Instrument),
            _ => Err(ConfigError::Partition(s.to_string())),
        }
    }
}

impl TryFrom<String> for Partition {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Partition::Table => write!(f, "table"),
            Partition::Instrument => write!(f, "instrument"),
        }
    }
}

/// Parameters of the feature engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureConfig {
    /// Rolling-mean window over `pct_net_com`, in rows.
    pub ma_window: usize,
    /// Z-score window over `pct_net_com`, in rows.
    pub z_lookback: usize,
    /// Absolute z-score beyond which a signal fires.
    pub z_thresh: f64,
    #[serde(default)]
    pub partition: Partition,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            ma_window: 13,
            z_lookback: 260,
            z_thresh: 1.0,
            partition: Partition::default(),
        }
    }
}

impl FeatureConfig {
    /// Checks the parameters before they reach the feature engine.
    ///
    /// # Errors
    ///
    /// Returns the first parameter that is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ma_window == 0 {
            return Err(ConfigError::MaWindow(self.ma_window));
        }
        if self.z_lookback < 2 {
            return Err(ConfigError::ZLookback(self.z_lookback));
        }
        if !self.z_thresh.is_finite() || self.z_thresh < 0.0 {
            return Err(ConfigError::ZThreshold(self.z_thresh));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Where `fetch` writes extracted records.
    pub records_path: String,
    /// Optional export of the enriched table.
    pub features_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: SourcesConfig {
                urls: vec![
                    "https://www.cftc.gov/dea/futures/deacmesf.htm".to_string(),
                    "https://www.cftc.gov/dea/futures/deanybtsf.htm".to_string(),
                ],
            },
            filter: FilterConfig {
                instruments: vec![
                    "USD INDEX - ICE FUTURES U.S.".to_string(),
                    "JAPANESE YEN - CHICAGO MERCANTILE EXCHANGE".to_string(),
                ],
            },
            features: FeatureConfig::default(),
            output: OutputConfig {
                records_path: "data/cot_records.csv".to_string(),
                features_path: None,
            },
        }
    }
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns an error if the feature parameters are out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.features.validate()
    }
}
