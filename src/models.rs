// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_CUSTOM_LABEL_LEN: usize = 15;
pub const MAX_DESCRIPTION_LEN: usize = 40;
pub const DEFAULT_DESCRIPTION: &str = "N/A";

static CUSTOM_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 _-]{1,15}$").expect("valid label pattern"));

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown transaction kind '{0}', expected income or expense")]
    UnknownKind(String),
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error(
        "custom category label '{0}' must be 1-{MAX_CUSTOM_LABEL_LEN} letters, digits, spaces, '-' or '_'"
    )]
    InvalidCustomLabel(String),
    #[error("category '{0}' does not take a custom label")]
    UnexpectedCustomLabel(String),
    #[error("amount {0} is negative; record expenses with kind 'expense' instead")]
    NegativeAmount(Decimal),
    #[error("description is longer than {MAX_DESCRIPTION_LEN} characters")]
    DescriptionTooLong,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(ModelError::UnknownKind(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction belongs to one of the fixed categories or carries a
/// user-supplied label under `Custom`. `Custom("Food")` and `Food` are
/// distinct values and are never merged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Rent,
    Food,
    Gym,
    Utilities,
    Loan,
    Clothing,
    Insurance,
    Savings,
    Entertainment,
    Healthcare,
    Supplies,
    Transportation,
    Education,
    Other,
    Custom(String),
}

impl Category {
    pub const FIXED: [Category; 14] = [
        Category::Rent,
        Category::Food,
        Category::Gym,
        Category::Utilities,
        Category::Loan,
        Category::Clothing,
        Category::Insurance,
        Category::Savings,
        Category::Entertainment,
        Category::Healthcare,
        Category::Supplies,
        Category::Transportation,
        Category::Education,
        Category::Other,
    ];

    pub fn custom(label: &str) -> Result<Self, ModelError> {
        if !CUSTOM_LABEL_RE.is_match(label) {
            return Err(ModelError::InvalidCustomLabel(label.to_string()));
        }
        Ok(Category::Custom(label.to_string()))
    }

    /// Builds a category from its stored/entered name and optional custom
    /// label. A fixed category must not carry a label; `custom` must.
    pub fn from_parts(name: &str, custom_label: Option<&str>) -> Result<Self, ModelError> {
        if name.eq_ignore_ascii_case("custom") {
            return Category::custom(custom_label.unwrap_or(""));
        }
        let fixed = Category::FIXED
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| ModelError::UnknownCategory(name.to_string()))?;
        if custom_label.is_some() {
            return Err(ModelError::UnexpectedCustomLabel(name.to_string()));
        }
        Ok(fixed)
    }

    pub fn name(&self) -> &str {
        match self {
            Category::Rent => "Rent",
            Category::Food => "Food",
            Category::Gym => "Gym",
            Category::Utilities => "Utilities",
            Category::Loan => "Loan",
            Category::Clothing => "Clothing",
            Category::Insurance => "Insurance",
            Category::Savings => "Savings",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Supplies => "Supplies",
            Category::Transportation => "Transportation",
            Category::Education => "Education",
            Category::Other => "Other",
            Category::Custom(label) => label,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Category::Custom(_))
    }

    /// (category name, custom label) as persisted in the transactions table.
    pub fn storage_parts(&self) -> (&str, Option<&str>) {
        match self {
            Category::Custom(label) => ("custom", Some(label)),
            fixed => (fixed.name(), None),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
    pub user_id: i64,
}

impl Transaction {
    /// All data-model invariants are checked here; the summary engine
    /// assumes its inputs went through this constructor.
    pub fn new(
        id: i64,
        date: NaiveDate,
        kind: TransactionKind,
        amount: Decimal,
        category: Category,
        description: Option<String>,
        user_id: i64,
    ) -> Result<Self, ModelError> {
        if amount < Decimal::ZERO {
            return Err(ModelError::NegativeAmount(amount));
        }
        let description = match description {
            Some(d) if !d.trim().is_empty() => {
                if d.chars().count() > MAX_DESCRIPTION_LEN {
                    return Err(ModelError::DescriptionTooLong);
                }
                d
            }
            _ => DEFAULT_DESCRIPTION.to_string(),
        };
        Ok(Self {
            id,
            date,
            kind,
            amount,
            category,
            description,
            user_id,
        })
    }
}
