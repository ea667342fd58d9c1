// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Transaction, TransactionKind};
use crate::summary::{self, TimeUnit};
use crate::utils::{
    fmt_amount, id_for_user, load_user_transactions, maybe_print_json, parse_date, parse_decimal,
    pretty_table,
};
use anyhow::{bail, Result};
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("income", sub)) => add(conn, sub, TransactionKind::Income)?,
        Some(("expense", sub)) => add(conn, sub, TransactionKind::Expense)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("delete", sub)) => delete(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn category_from_args(sub: &clap::ArgMatches) -> Result<Category> {
    let name = sub.get_one::<String>("category").unwrap();
    let label = sub.get_one::<String>("label").map(|s| s.as_str());
    Ok(Category::from_parts(name, label)?)
}

fn add(conn: &Connection, sub: &clap::ArgMatches, kind: TransactionKind) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = category_from_args(sub)?;
    let description = sub.get_one::<String>("desc").map(|s| s.to_string());
    let username = sub.get_one::<String>("user").unwrap();
    let user_id = id_for_user(conn, username)?;

    // Validation happens here; the id is assigned by the storage layer.
    let tx = Transaction::new(0, date, kind, amount, category, description, user_id)?;

    let (cat_name, custom_label) = tx.category.storage_parts();
    conn.execute(
        "INSERT INTO transactions(date, kind, amount, category, custom_label, description, user_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            tx.date.to_string(),
            tx.kind.as_str(),
            tx.amount.to_string(),
            cat_name,
            custom_label,
            tx.description,
            tx.user_id
        ],
    )?;
    println!(
        "Recorded {} {} on {} in {} (#{}, user '{}')",
        tx.kind,
        fmt_amount(&tx.amount),
        tx.date,
        tx.category,
        conn.last_insert_rowid(),
        username
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Kind", "Amount", "Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let username = sub.get_one::<String>("user").unwrap();
    let user_id = id_for_user(conn, username)?;

    let mut sql = String::from(
        "SELECT t.id, t.date, t.kind, t.amount, t.category, t.custom_label, t.description
         FROM transactions t WHERE t.user_id=?",
    );
    let mut params_vec: Vec<String> = vec![user_id.to_string()];

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(t.date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        let category = Category::from_parts(cat, sub.get_one::<String>("label").map(|s| s.as_str()))?;
        let (name, label) = category.storage_parts();
        sql.push_str(" AND t.category=?");
        params_vec.push(name.into());
        if let Some(l) = label {
            sql.push_str(" AND t.custom_label=?");
            params_vec.push(l.into());
        }
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let kind: String = r.get(2)?;
        let amount: String = r.get(3)?;
        let category: String = r.get(4)?;
        let custom_label: Option<String> = r.get(5)?;
        let description: Option<String> = r.get(6)?;
        data.push(TransactionRow {
            id,
            date,
            kind,
            amount,
            category: custom_label.unwrap_or(category),
            description: description.unwrap_or_default(),
        });
    }
    Ok(data)
}

fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("user").unwrap();
    let user_id = id_for_user(conn, username)?;

    if let Some(id) = sub.get_one::<i64>("id") {
        let n = conn.execute(
            "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
            params![id, user_id],
        )?;
        if n == 0 {
            bail!("No transaction #{} for user '{}'", id, username);
        }
        println!("Deleted transaction #{}", id);
        return Ok(());
    }

    if let Some(pick) = sub.get_one::<usize>("pick") {
        let unit: TimeUnit = sub.get_one::<String>("by").unwrap().parse()?;
        let txs = load_user_transactions(conn, user_id)?;
        let grouped = summary::group(txs, unit);
        let id = grouped
            .numbered()
            .iter()
            .find(|(n, _)| n == pick)
            .map(|(_, tx)| tx.id);
        match id {
            Some(id) => {
                conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
                println!("Deleted transaction #{} (pick {})", id, pick);
                Ok(())
            }
            None => bail!(
                "Pick {} is out of range; user '{}' has {} transactions",
                pick,
                username,
                grouped.transaction_count()
            ),
        }
    } else if sub.get_one::<String>("category").is_some() {
        let category = category_from_args(sub)?;
        let (name, label) = category.storage_parts();
        let n = match label {
            Some(l) => conn.execute(
                "DELETE FROM transactions WHERE user_id=?1 AND category=?2 AND custom_label=?3",
                params![user_id, name, l],
            )?,
            None => conn.execute(
                "DELETE FROM transactions WHERE user_id=?1 AND category=?2 AND custom_label IS NULL",
                params![user_id, name],
            )?,
        };
        println!("Deleted {} transaction(s) in {}", n, category);
        Ok(())
    } else {
        bail!("Provide --id, --pick or --category to select what to delete");
    }
}
