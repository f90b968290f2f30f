//! Calendar holidays that change how turtles look.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Holiday {
    #[default]
    None,
    Valentines,
    AprilFoolsDay,
    Halloween,
    Christmas,
}

impl Holiday {
    /// The holiday falling on a calendar date. `month` is 1-based.
    pub fn from_month_day(month: u32, day: u32) -> Self {
        match (month, day) {
            (2, 14) => Holiday::Valentines,
            (4, 1) => Holiday::AprilFoolsDay,
            (10, 31) => Holiday::Halloween,
            (12, 24..=30) => Holiday::Christmas,
            _ => Holiday::None,
        }
    }

    /// The holiday for today's local date.
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::from_month_day(today.month(), today.day())
    }
}
