//! Calendar month partition keys.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Index of one of the twelve month buckets (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Month(u8);

impl Month {
    pub const COUNT: usize = 12;

    pub fn new(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Bucket a caller would usually pick for `date`. The store never derives
    /// buckets on its own; this is a convenience for UI collaborators.
    pub fn of(date: NaiveDate) -> Self {
        Self(date.month0() as u8)
    }

    pub fn all() -> impl Iterator<Item = Month> {
        (0..Self::COUNT as u8).map(Month)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Localised month name, e.g. `Janeiro`.
    pub fn name(self) -> &'static str {
        MONTH_NAMES[self.index()]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<usize> for Month {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Month::new(value).ok_or_else(|| format!("month index {value} is out of range"))
    }
}

impl From<Month> for usize {
    fn from(month: Month) -> Self {
        month.index()
    }
}
