//! Feature engine over a date-ordered series.
//!
//! Per-row features (net positioning, per-trader averages) depend only on
//! their own row. Rolling and percentile features run over a partition of
//! the table, in table order, so every row only sees rows at or before it
//! in the rolling windows.

use std::collections::HashMap;

use cot_core::{FeatureConfig, Partition};
use cot_data::{Category, SeriesRow, SeriesTable};

use crate::features::{
    avg_per_trader, percentile_rank, rolling_mean, rolling_zscore, Bias, DominantSide,
    GroupValues, NetGroup, Scale, TradeSignal,
};

/// Columns derived for one row.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFeatures {
    /// `commit_com_long - commit_com_short`
    pub net_com: Option<f64>,
    /// `change_com_long - change_com_short`
    pub delta_net_com: Option<f64>,
    /// Long minus short share of open interest, per group.
    pub pct_net: GroupValues<Option<f64>>,
    pub avg_com_long_per_trader: f64,
    pub avg_com_short_per_trader: f64,
    pub avg_noncom_long_per_trader: f64,
    pub avg_noncom_short_per_trader: f64,
    pub ma_pct_net_com: Option<f64>,
    pub z_com: Option<f64>,
    pub pctl_net: GroupValues<Option<f64>>,
    pub scale: GroupValues<Option<Scale>>,
    pub bias: GroupValues<Option<Bias>>,
    pub signal: TradeSignal,
    pub dominant_bias: DominantSide,
}

impl DerivedFeatures {
    /// Features that need nothing but the row itself.
    fn from_row(row: &SeriesRow) -> Self {
        let commit = |c: Category| row.commitments.value(c);
        let change = |c: Category| row.changes.value(c);
        let traders = |c: Category| row.traders.value(c);

        let mut pct_net = GroupValues::default();
        for group in NetGroup::ALL {
            pct_net.set(
                group,
                difference(row.percents.value(group.long()), row.percents.value(group.short())),
            );
        }

        let avg_com_long = avg_per_trader(commit(Category::ComLong), traders(Category::ComLong));
        let avg_com_short =
            avg_per_trader(commit(Category::ComShort), traders(Category::ComShort));
        let avg_noncom_long =
            avg_per_trader(commit(Category::NonComLong), traders(Category::NonComLong));
        let avg_noncom_short =
            avg_per_trader(commit(Category::NonComShort), traders(Category::NonComShort));

        Self {
            net_com: difference(commit(Category::ComLong), commit(Category::ComShort)),
            delta_net_com: difference(change(Category::ComLong), change(Category::ComShort)),
            pct_net,
            avg_com_long_per_trader: avg_com_long,
            avg_com_short_per_trader: avg_com_short,
            avg_noncom_long_per_trader: avg_noncom_long,
            avg_noncom_short_per_trader: avg_noncom_short,
            ma_pct_net_com: None,
            z_com: None,
            pctl_net: GroupValues::default(),
            scale: GroupValues::default(),
            bias: GroupValues::default(),
            signal: TradeSignal::Flat,
            dominant_bias: DominantSide::from_averages(
                avg_com_long,
                avg_com_short,
                avg_noncom_long,
                avg_noncom_short,
            ),
        }
    }

    /// Derived column names in output order.
    #[must_use]
    pub fn column_names() -> Vec<String> {
        let mut columns = vec!["net_com".to_string(), "delta_net_com".to_string()];
        for group in NetGroup::ALL {
            columns.push(format!("pct_net_{}", group.label()));
        }
        for name in [
            "avg_com_long_per_trader",
            "avg_com_short_per_trader",
            "avg_noncom_long_per_trader",
            "avg_noncom_short_per_trader",
            "ma_pct_net_com",
            "z_com",
        ] {
            columns.push(name.to_string());
        }
        for prefix in ["pctl_net", "scale", "bias"] {
            for group in NetGroup::ALL {
                columns.push(format!("{prefix}_{}", group.label()));
            }
        }
        columns.push("signal".to_string());
        columns.push("dominant_bias".to_string());
        columns
    }

    /// Values aligned with [`DerivedFeatures::column_names`]; missing values are empty.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        fn cell<T: ToString>(v: Option<T>) -> String {
            v.map(|x| x.to_string()).unwrap_or_default()
        }

        let mut row = vec![cell(self.net_com), cell(self.delta_net_com)];
        for group in NetGroup::ALL {
            row.push(cell(self.pct_net.get(group)));
        }
        for value in [
            self.avg_com_long_per_trader,
            self.avg_com_short_per_trader,
            self.avg_noncom_long_per_trader,
            self.avg_noncom_short_per_trader,
        ] {
            row.push(value.to_string());
        }
        row.push(cell(self.ma_pct_net_com));
        row.push(cell(self.z_com));
        for group in NetGroup::ALL {
            row.push(cell(self.pctl_net.get(group)));
        }
        for group in NetGroup::ALL {
            row.push(cell(self.scale.get(group)));
        }
        for group in NetGroup::ALL {
            row.push(cell(self.bias.get(group)));
        }
        row.push(self.signal.to_string());
        row.push(self.dominant_bias.to_string());
        row
    }
}

fn difference(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? - b?)
}

/// A series row with its derived features.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub series: SeriesRow,
    pub features: DerivedFeatures,
}

/// The enriched table, in the row order of its source series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureTable {
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    #[must_use]
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Series columns followed by derived columns.
    #[must_use]
    pub fn column_names() -> Vec<String> {
        let mut columns = cot_data::Record::column_names();
        columns.extend(DerivedFeatures::column_names());
        columns
    }

    /// Flat rows aligned with [`FeatureTable::column_names`].
    pub fn to_rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows.iter().map(|r| {
            let mut row = r.series.to_row();
            row.extend(r.features.to_row());
            row
        })
    }
}

/// Computes [`DerivedFeatures`] for a [`SeriesTable`].
pub struct FeatureEngine {
    config: FeatureConfig,
}

impl FeatureEngine {
    /// `config` is expected to have passed [`FeatureConfig::validate`].
    #[must_use]
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Returns a new table; `table` is left untouched.
    #[must_use]
    pub fn compute(&self, table: &SeriesTable) -> FeatureTable {
        let rows = table.rows();
        let mut features: Vec<DerivedFeatures> =
            rows.iter().map(DerivedFeatures::from_row).collect();

        let partitions = partition_indices(rows, self.config.partition);
        for indices in &partitions {
            self.apply_rolling(indices, &mut features);
            apply_percentiles(indices, &mut features);
        }

        for f in &mut features {
            f.signal = TradeSignal::from_zscore(f.z_com, self.config.z_thresh);
        }

        tracing::info!(
            rows = rows.len(),
            partitions = partitions.len(),
            partition = %self.config.partition,
            "Computed positioning features"
        );

        FeatureTable {
            rows: rows
                .iter()
                .cloned()
                .zip(features)
                .map(|(series, features)| FeatureRow { series, features })
                .collect(),
        }
    }

    fn apply_rolling(&self, indices: &[usize], features: &mut [DerivedFeatures]) {
        let pct_net_com: Vec<Option<f64>> =
            indices.iter().map(|&i| features[i].pct_net.com).collect();

        let means = rolling_mean(&pct_net_com, self.config.ma_window);
        let zscores = rolling_zscore(&pct_net_com, self.config.z_lookback);

        for ((&i, mean), z) in indices.iter().zip(means).zip(zscores) {
            features[i].ma_pct_net_com = mean;
            features[i].z_com = z;
        }
    }
}

fn apply_percentiles(indices: &[usize], features: &mut [DerivedFeatures]) {
    for group in NetGroup::ALL {
        let values: Vec<Option<f64>> = indices
            .iter()
            .map(|&i| features[i].pct_net.get(group))
            .collect();

        for (&i, pctl) in indices.iter().zip(percentile_rank(&values)) {
            let scale = pctl.map(|p| group.scale(p));
            features[i].pctl_net.set(group, pctl);
            features[i].scale.set(group, scale);
            features[i].bias.set(group, scale.map(Bias::from_scale));
        }
    }
}

/// Row indices per partition, each in table order.
fn partition_indices(rows: &[SeriesRow], partition: Partition) -> Vec<Vec<usize>> {
    match partition {
        Partition::Table => vec![(0..rows.len()).collect()],
        Partition::Instrument => {
            let mut order: Vec<&str> = Vec::new();
            let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
            for (i, row) in rows.iter().enumerate() {
                groups
                    .entry(row.instrument.as_str())
                    .or_insert_with(|| {
                        order.push(row.instrument.as_str());
                        Vec::new()
                    })
                    .push(i);
            }
            order
                .into_iter()
                .filter_map(|name| groups.remove(name))
                .collect()
        }
    }
}
