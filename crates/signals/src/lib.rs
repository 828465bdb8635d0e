pub mod engine;
pub mod features;

pub use engine::{DerivedFeatures, FeatureEngine, FeatureRow, FeatureTable};

pub use features::{
    avg_per_trader, calculate_ranks, percentile_rank, rolling_mean, rolling_zscore, Bias,
    DominantSide, GroupValues, NetGroup, Scale, TradeSignal,
};
