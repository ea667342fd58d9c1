// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionKind;
use crate::summary::{self, TimeUnit};
use crate::utils::{fmt_amount, id_for_user, load_user_transactions, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => grouped_summary(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("balance", sub)) => balance(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn grouped_summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let username = sub.get_one::<String>("user").unwrap();
    let unit: TimeUnit = sub.get_one::<String>("by").unwrap().parse()?;

    let user_id = id_for_user(conn, username)?;
    let txs = load_user_transactions(conn, user_id)?;
    let grouped = summary::group(txs, unit);

    if grouped.is_empty() {
        println!("No transactions recorded for user '{}'", username);
        return Ok(());
    }

    let mut data = Vec::new();
    let mut n = 0usize;
    for (key, bucket) in &grouped.buckets {
        let mut first = true;
        for tx in &bucket.transactions {
            n += 1;
            data.push(vec![
                if first { key.label() } else { String::new() },
                n.to_string(),
                tx.date.to_string(),
                tx.kind.to_string(),
                fmt_amount(&tx.amount),
                tx.category.to_string(),
                tx.description.clone(),
            ]);
            first = false;
        }
        data.push(vec![
            String::new(),
            String::new(),
            String::new(),
            "net".into(),
            fmt_amount(&bucket.net()),
            String::new(),
            String::new(),
        ]);
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["Period", "#", "Date", "Kind", "Amount", "Category", "Description"],
                data,
            )
        );
        println!(
            "Total income: {}  Total expense: {}  Net result: {}",
            fmt_amount(&grouped.total_income),
            fmt_amount(&grouped.total_expense),
            fmt_amount(&grouped.net_result)
        );
    }
    Ok(())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let username = sub.get_one::<String>("user").unwrap();

    let user_id = id_for_user(conn, username)?;
    let txs = load_user_transactions(conn, user_id)?;
    let totals = summary::aggregate_by_category(&txs);

    let mut data = Vec::new();
    for (category, t) in &totals {
        let name = if category.is_custom() {
            format!("{} (custom)", category)
        } else {
            category.to_string()
        };
        data.push(vec![
            name,
            fmt_amount(&t.income),
            fmt_amount(&t.expense),
            fmt_amount(&t.net()),
        ]);
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Category", "Income", "Expense", "Net"], data)
        );
    }
    Ok(())
}

fn balance(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("user").unwrap();
    let user_id = id_for_user(conn, username)?;
    let txs = load_user_transactions(conn, user_id)?;

    let mut balance = Decimal::ZERO;
    for tx in &txs {
        match tx.kind {
            TransactionKind::Income => balance += tx.amount,
            TransactionKind::Expense => balance -= tx.amount,
        }
    }
    println!("Balance for '{}': {}", username, fmt_amount(&balance));
    Ok(())
}
