// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallybook::models::{Category, ModelError, Transaction, TransactionKind};
use tallybook::summary;

fn tx(id: i64, kind: TransactionKind, amount: &str, category: Category) -> Transaction {
    Transaction::new(
        id,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        kind,
        amount.parse::<Decimal>().unwrap(),
        category,
        None,
        1,
    )
    .unwrap()
}

#[test]
fn custom_label_never_merges_with_fixed_category() {
    let txs = vec![
        tx(1, TransactionKind::Expense, "25", Category::Food),
        tx(2, TransactionKind::Expense, "10", Category::custom("Food").unwrap()),
    ];
    let totals = summary::aggregate_by_category(&txs);

    assert_eq!(totals.len(), 2);
    assert_eq!(totals[&Category::Food].expense, Decimal::from(25));
    assert_eq!(
        totals[&Category::Custom("Food".into())].expense,
        Decimal::from(10)
    );
}

#[test]
fn category_totals_split_income_and_expense() {
    let txs = vec![
        tx(1, TransactionKind::Income, "100", Category::Savings),
        tx(2, TransactionKind::Expense, "30", Category::Savings),
        tx(3, TransactionKind::Expense, "12.50", Category::Rent),
    ];
    let totals = summary::aggregate_by_category(&txs);

    let savings = &totals[&Category::Savings];
    assert_eq!(savings.income, Decimal::from(100));
    assert_eq!(savings.expense, Decimal::from(30));
    assert_eq!(savings.net(), Decimal::from(70));
    assert_eq!(totals[&Category::Rent].income, Decimal::ZERO);
}

#[test]
fn custom_label_charset_and_length_are_enforced() {
    assert!(Category::custom("Dog food").is_ok());
    assert!(Category::custom("side-hustle_2").is_ok());

    assert!(matches!(
        Category::custom(""),
        Err(ModelError::InvalidCustomLabel(_))
    ));
    assert!(matches!(
        Category::custom("way too long a label"),
        Err(ModelError::InvalidCustomLabel(_))
    ));
    assert!(matches!(
        Category::custom("nope!"),
        Err(ModelError::InvalidCustomLabel(_))
    ));
}

#[test]
fn fixed_category_rejects_a_custom_label() {
    assert!(matches!(
        Category::from_parts("Food", Some("snacks")),
        Err(ModelError::UnexpectedCustomLabel(_))
    ));
    assert!(Category::from_parts("food", None).is_ok());
    assert!(Category::from_parts("custom", Some("snacks")).is_ok());
    assert!(matches!(
        Category::from_parts("custom", None),
        Err(ModelError::InvalidCustomLabel(_))
    ));
    assert!(matches!(
        Category::from_parts("Groceries", None),
        Err(ModelError::UnknownCategory(_))
    ));
}

#[test]
fn transaction_construction_enforces_the_data_model() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    assert!(matches!(
        Transaction::new(
            1,
            date,
            TransactionKind::Expense,
            Decimal::from(-5),
            Category::Food,
            None,
            1
        ),
        Err(ModelError::NegativeAmount(_))
    ));

    let long = "x".repeat(41);
    assert!(matches!(
        Transaction::new(
            1,
            date,
            TransactionKind::Income,
            Decimal::ONE,
            Category::Food,
            Some(long),
            1
        ),
        Err(ModelError::DescriptionTooLong)
    ));

    let tx = Transaction::new(
        1,
        date,
        TransactionKind::Income,
        Decimal::ONE,
        Category::Food,
        None,
        1,
    )
    .unwrap();
    assert_eq!(tx.description, "N/A");
}
