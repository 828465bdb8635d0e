//! Discrete readings derived from percentiles and z-scores.

use cot_data::Category;

/// Trader group whose net positioning is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetGroup {
    Com,
    NonCom,
    NonRep,
}

impl NetGroup {
    pub const ALL: [NetGroup; 3] = [NetGroup::Com, NetGroup::NonCom, NetGroup::NonRep];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            NetGroup::Com => "com",
            NetGroup::NonCom => "noncom",
            NetGroup::NonRep => "nonrep",
        }
    }

    #[must_use]
    pub const fn long(self) -> Category {
        match self {
            NetGroup::Com => Category::ComLong,
            NetGroup::NonCom => Category::NonComLong,
            NetGroup::NonRep => Category::NonRepLong,
        }
    }

    #[must_use]
    pub const fn short(self) -> Category {
        match self {
            NetGroup::Com => Category::ComShort,
            NetGroup::NonCom => Category::NonComShort,
            NetGroup::NonRep => Category::NonRepShort,
        }
    }

    /// Scale for a percentile reading of this group's net positioning.
    ///
    /// Heavy net-long small-trader positioning reads bearish, so the
    /// non-reportable scale runs the other way.
    #[must_use]
    pub fn scale(self, percentile: f64) -> Scale {
        let bucket = Scale::from_percentile(percentile);
        match self {
            NetGroup::NonRep => bucket.inverted(),
            NetGroup::Com | NetGroup::NonCom => bucket,
        }
    }
}

/// One value per [`NetGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupValues<T> {
    pub com: T,
    pub noncom: T,
    pub nonrep: T,
}

impl<T: Copy> GroupValues<T> {
    #[must_use]
    pub fn get(&self, group: NetGroup) -> T {
        match group {
            NetGroup::Com => self.com,
            NetGroup::NonCom => self.noncom,
            NetGroup::NonRep => self.nonrep,
        }
    }

    pub fn set(&mut self, group: NetGroup, value: T) {
        match group {
            NetGroup::Com => self.com = value,
            NetGroup::NonCom => self.noncom = value,
            NetGroup::NonRep => self.nonrep = value,
        }
    }
}

/// Quintile bucket of a percentile, 1 (lowest) to 5 (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Scale(u8);

impl Scale {
    /// Returns `None` outside 1..=5.
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        (1..=5).contains(&value).then_some(Self(value))
    }

    /// Buckets `[0,20]`, `(20,40]`, `(40,60]`, `(60,80]`, `(80,100]`.
    #[must_use]
    pub fn from_percentile(percentile: f64) -> Self {
        let bucket = match percentile {
            p if p <= 20.0 => 1,
            p if p <= 40.0 => 2,
            p if p <= 60.0 => 3,
            p if p <= 80.0 => 4,
            _ => 5,
        };
        Self(bucket)
    }

    /// `6 - scale`.
    #[must_use]
    pub fn inverted(self) -> Self {
        Self(6 - self.0)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Directional reading of a [`Scale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bias {
    Bullish,
    Neutral,
    Bearish,
}

impl Bias {
    #[must_use]
    pub fn from_scale(scale: Scale) -> Self {
        match scale.value() {
            4 | 5 => Bias::Bullish,
            3 => Bias::Neutral,
            _ => Bias::Bearish,
        }
    }
}

impl std::fmt::Display for Bias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bias::Bullish => write!(f, "Bullish"),
            Bias::Neutral => write!(f, "Neutral"),
            Bias::Bearish => write!(f, "Bearish"),
        }
    }
}

/// Contrarian signal from the commercial net-positioning z-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TradeSignal {
    /// z below `-threshold`
    Long,
    #[default]
    Flat,
    /// z above `+threshold`
    Short,
}

impl TradeSignal {
    /// Missing z-scores give [`TradeSignal::Flat`]. Comparisons are strict.
    #[must_use]
    pub fn from_zscore(zscore: Option<f64>, threshold: f64) -> Self {
        match zscore {
            Some(z) if z < -threshold => TradeSignal::Long,
            Some(z) if z > threshold => TradeSignal::Short,
            _ => TradeSignal::Flat,
        }
    }

    /// `+1`, `0` or `-1`.
    #[must_use]
    pub fn value(self) -> i8 {
        match self {
            TradeSignal::Long => 1,
            TradeSignal::Flat => 0,
            TradeSignal::Short => -1,
        }
    }
}

impl std::fmt::Display for TradeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
