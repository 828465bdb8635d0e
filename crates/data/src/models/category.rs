//! Trader categories and per-category value storage.

/// A column of a report's figure rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    NonComLong,
    NonComShort,
    NonComSpreads,
    ComLong,
    ComShort,
    TotalLong,
    TotalShort,
    NonRepLong,
    NonRepShort,
}

impl Category {
    /// Canonical report order; the Nth figure of a row belongs to `ALL[N]`.
    pub const ALL: [Category; 9] = [
        Category::NonComLong,
        Category::NonComShort,
        Category::NonComSpreads,
        Category::ComLong,
        Category::ComShort,
        Category::TotalLong,
        Category::TotalShort,
        Category::NonRepLong,
        Category::NonRepShort,
    ];

    /// Categories with a trader count. Non-reportable positions have none.
    pub const TRADER_BEARING: [Category; 7] = [
        Category::NonComLong,
        Category::NonComShort,
        Category::NonComSpreads,
        Category::ComLong,
        Category::ComShort,
        Category::TotalLong,
        Category::TotalShort,
    ];

    /// Column suffix used in flat records, e.g. `commit_com_long`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::NonComLong => "noncom_long",
            Category::NonComShort => "noncom_short",
            Category::NonComSpreads => "noncom_spreads",
            Category::ComLong => "com_long",
            Category::ComShort => "com_short",
            Category::TotalLong => "tot_long",
            Category::TotalShort => "tot_short",
            Category::NonRepLong => "nonrep_long",
            Category::NonRepShort => "nonrep_short",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn has_traders(self) -> bool {
        Self::TRADER_BEARING.contains(&self)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One optional value per [`Category`].
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValues<T> {
    values: [Option<T>; 9],
}

impl<T> Default for CategoryValues<T> {
    fn default() -> Self {
        Self {
            values: std::array::from_fn(|_| None),
        }
    }
}

impl<T> CategoryValues<T> {
    /// Assigns `tokens` to `labels` in lock-step.
    ///
    /// Labels left without a token stay missing; tokens beyond the last
    /// label are ignored.
    pub fn from_positional<I>(labels: &[Category], tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut out = Self::default();
        for (category, token) in labels.iter().zip(tokens) {
            out.set(*category, Some(token));
        }
        out
    }

    #[must_use]
    pub fn get(&self, category: Category) -> Option<&T> {
        self.values[category.index()].as_ref()
    }

    pub fn set(&mut self, category: Category, value: Option<T>) {
        self.values[category.index()] = value;
    }

    /// Iterates in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Option<&T>)> + '_ {
        Category::ALL
            .iter()
            .map(move |c| (*c, self.values[c.index()].as_ref()))
    }

    /// Number of categories holding a value.
    #[must_use]
    pub fn present(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn map<U, F>(&self, mut f: F) -> CategoryValues<U>
    where
        F: FnMut(&T) -> Option<U>,
    {
        CategoryValues {
            values: std::array::from_fn(|i| self.values[i].as_ref().and_then(&mut f)),
        }
    }
}

impl<T: Copy> CategoryValues<T> {
    #[must_use]
    pub fn value(&self, category: Category) -> Option<T> {
        self.values[category.index()]
    }
}
