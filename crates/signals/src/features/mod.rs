//! Building blocks of the feature engine.
//!
//! Rolling statistics, percentile ranking and the discrete labels derived
//! from them. Series are slices of `Option<f64>` in row order, with `None`
//! marking a missing observation.

mod dominant;
mod labels;
mod rank;
mod rolling;

pub use dominant::{avg_per_trader, DominantSide};
pub use labels::{Bias, GroupValues, NetGroup, Scale, TradeSignal};
pub use rank::{calculate_ranks, percentile_rank};
pub use rolling::{rolling_mean, rolling_zscore};
