// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, TransactionKind, MAX_DESCRIPTION_LEN};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = findings(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn findings(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    // 1) Orphaned transactions (user gone despite FK)
    let mut stmt = conn.prepare(
        "SELECT t.id FROM transactions t LEFT JOIN users u ON t.user_id=u.id WHERE u.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["orphaned_user".into(), format!("tx #{}", id)]);
    }

    // 2) Rows violating the data model
    let mut stmt2 = conn.prepare(
        "SELECT id, date, kind, amount, category, custom_label, description FROM transactions ORDER BY id",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let kind: String = r.get(2)?;
        let amount: String = r.get(3)?;
        let category: String = r.get(4)?;
        let custom_label: Option<String> = r.get(5)?;
        let description: Option<String> = r.get(6)?;

        if chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
            rows.push(vec!["bad_date".into(), format!("tx #{}: '{}'", id, date)]);
        }
        if TransactionKind::parse(&kind).is_err() {
            rows.push(vec!["bad_kind".into(), format!("tx #{}: '{}'", id, kind)]);
        }
        match amount.parse::<Decimal>() {
            Ok(a) if a < Decimal::ZERO => {
                rows.push(vec!["negative_amount".into(), format!("tx #{}: {}", id, a)]);
            }
            Ok(_) => {}
            Err(_) => {
                rows.push(vec!["bad_amount".into(), format!("tx #{}: '{}'", id, amount)]);
            }
        }
        if let Err(e) = Category::from_parts(&category, custom_label.as_deref()) {
            rows.push(vec!["bad_category".into(), format!("tx #{}: {}", id, e)]);
        }
        if let Some(d) = description {
            if d.chars().count() > MAX_DESCRIPTION_LEN {
                rows.push(vec![
                    "description_too_long".into(),
                    format!("tx #{}: {} chars", id, d.chars().count()),
                ]);
            }
        }
    }

    Ok(rows)
}
