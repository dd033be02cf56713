//! Period navigation strategies.

use std::fmt::Debug;

use chrono::{Datelike, Days, NaiveDate};

use crate::paths::{date_label, week_label};

/// Computes adjacent periods and period bounds for a date.
///
/// Every method is a pure function of its argument. Dates at the edge of the
/// representable range saturate instead of panicking.
pub trait PeriodNavigator: Send + Sync + Debug {
    fn previous(&self, date: NaiveDate) -> NaiveDate;

    fn next(&self, date: NaiveDate) -> NaiveDate;

    /// First day of the period containing `date`.
    fn start(&self, date: NaiveDate) -> NaiveDate;

    /// Last day of the period containing `date`.
    fn end(&self, date: NaiveDate) -> NaiveDate;

    /// Human label of the period containing `date`, also used as a file stem.
    fn label(&self, date: NaiveDate) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DailyNavigator;

impl PeriodNavigator for DailyNavigator {
    fn previous(&self, date: NaiveDate) -> NaiveDate {
        date.pred_opt().unwrap_or(date)
    }

    fn next(&self, date: NaiveDate) -> NaiveDate {
        date.succ_opt().unwrap_or(date)
    }

    fn start(&self, date: NaiveDate) -> NaiveDate {
        date
    }

    fn end(&self, date: NaiveDate) -> NaiveDate {
        date
    }

    fn label(&self, date: NaiveDate) -> String {
        date_label(date)
    }
}

/// ISO weeks, Monday through Sunday.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeeklyNavigator;

impl PeriodNavigator for WeeklyNavigator {
    fn previous(&self, date: NaiveDate) -> NaiveDate {
        let start = self.start(date);
        start.checked_sub_days(Days::new(7)).unwrap_or(start)
    }

    fn next(&self, date: NaiveDate) -> NaiveDate {
        let start = self.start(date);
        start.checked_add_days(Days::new(7)).unwrap_or(start)
    }

    fn start(&self, date: NaiveDate) -> NaiveDate {
        let offset = u64::from(date.weekday().num_days_from_monday());
        date.checked_sub_days(Days::new(offset)).unwrap_or(date)
    }

    fn end(&self, date: NaiveDate) -> NaiveDate {
        let start = self.start(date);
        start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX)
    }

    fn label(&self, date: NaiveDate) -> String {
        week_label(date)
    }
}
