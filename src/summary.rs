// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure grouping and aggregation over transaction lists. No I/O here:
//! callers fetch rows, this module turns them into a `Summary`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Category, Transaction, TransactionKind};

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("invalid time unit '{0}', expected day, week, month or year")]
    InvalidTimeUnit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(TimeUnit::Day),
            "week" => Ok(TimeUnit::Week),
            "month" => Ok(TimeUnit::Month),
            "year" => Ok(TimeUnit::Year),
            _ => Err(SummaryError::InvalidTimeUnit(s.to_string())),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Period bucket key. Ordering is on the underlying date tuple, never on the
/// formatted label, so Month/Week buckets iterate chronologically ("April
/// 2024" must not sort before "January 2024").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PeriodKey {
    Day(NaiveDate),
    /// ISO-8601 year and week: week 1 contains the year's first Thursday,
    /// weeks run Monday-Sunday. The ISO year near calendar-year boundaries
    /// may differ from `date.year()` and is what the label encodes.
    Week {
        year: i32,
        week: u32,
    },
    Month {
        year: i32,
        month: u32,
    },
    Year(i32),
}

impl PeriodKey {
    pub fn of(date: NaiveDate, unit: TimeUnit) -> Self {
        match unit {
            TimeUnit::Day => PeriodKey::Day(date),
            TimeUnit::Week => {
                let iso = date.iso_week();
                PeriodKey::Week {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            TimeUnit::Month => PeriodKey::Month {
                year: date.year(),
                month: date.month(),
            },
            TimeUnit::Year => PeriodKey::Year(date.year()),
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PeriodKey::Week { year, week } => write!(f, "{:04} - Week {:02}", year, week),
            PeriodKey::Month { year, month } => {
                write!(f, "{} {}", MONTH_NAMES[(month - 1) as usize], year)
            }
            PeriodKey::Year(year) => write!(f, "{}", year),
        }
    }
}

/// One period bucket. Subtotals are maintained as transactions are pushed,
/// and transactions keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    pub transactions: Vec<Transaction>,
    pub income: Decimal,
    pub expense: Decimal,
}

impl Bucket {
    fn push(&mut self, tx: Transaction) {
        match tx.kind {
            TransactionKind::Income => self.income += tx.amount,
            TransactionKind::Expense => self.expense += tx.amount,
        }
        self.transactions.push(tx);
    }

    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

/// Projection of one user's transactions for a given time unit. Rebuilt on
/// every query and discarded after display.
#[derive(Debug, Clone)]
pub struct Summary {
    pub time_unit: TimeUnit,
    pub buckets: BTreeMap<PeriodKey, Bucket>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_result: Decimal,
}

impl Summary {
    fn empty(time_unit: TimeUnit) -> Self {
        Self {
            time_unit,
            buckets: BTreeMap::new(),
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            net_result: Decimal::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn transaction_count(&self) -> usize {
        self.buckets.values().map(|b| b.transactions.len()).sum()
    }

    /// Transactions in ascending key order with 1-based display indices,
    /// for pick-by-number flows.
    pub fn numbered(&self) -> Vec<(usize, &Transaction)> {
        self.buckets
            .values()
            .flat_map(|b| b.transactions.iter())
            .zip(1..)
            .map(|(tx, n)| (n, tx))
            .collect()
    }
}

/// Groups transactions into period buckets and accumulates global totals in
/// a single pass. Relative order within a bucket is the input order; callers
/// conventionally supply ascending-by-date input. An empty input yields an
/// empty summary, not an error.
pub fn group(transactions: Vec<Transaction>, time_unit: TimeUnit) -> Summary {
    let mut summary = Summary::empty(time_unit);
    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => summary.total_income += tx.amount,
            TransactionKind::Expense => summary.total_expense += tx.amount,
        }
        summary
            .buckets
            .entry(PeriodKey::of(tx.date, time_unit))
            .or_default()
            .push(tx);
    }
    summary.net_result = summary.total_income - summary.total_expense;
    summary
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl CategoryTotals {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

/// Income/expense subtotals per category. The key is the `Category` value
/// itself, so a `Custom` label spelled like a fixed category name stays a
/// separate entry.
pub fn aggregate_by_category(transactions: &[Transaction]) -> BTreeMap<Category, CategoryTotals> {
    let mut totals: BTreeMap<Category, CategoryTotals> = BTreeMap::new();
    for tx in transactions {
        if let Category::Custom(label) = &tx.category {
            debug_assert!(!label.is_empty(), "custom category with empty label");
        }
        let entry = totals.entry(tx.category.clone()).or_default();
        match tx.kind {
            TransactionKind::Income => entry.income += tx.amount,
            TransactionKind::Expense => entry.expense += tx.amount,
        }
    }
    totals
}
