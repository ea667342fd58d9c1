// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::id_for_user;
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut sql = String::from(
        "SELECT t.date, u.username, t.kind, t.amount, t.category, t.custom_label, t.description
         FROM transactions t JOIN users u ON t.user_id=u.id",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(username) = sub.get_one::<String>("user") {
        let user_id = id_for_user(conn, username)?;
        sql.push_str(" WHERE t.user_id=?");
        params_vec.push(user_id.to_string());
    }
    sql.push_str(" ORDER BY t.date, t.id");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let rows = stmt.query_map(rusqlite::params_from_iter(params), |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, Option<String>>(5)?,
            r.get::<_, Option<String>>(6)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "user",
                "kind",
                "amount",
                "category",
                "custom_label",
                "description",
            ])?;
            for row in rows {
                let (d, user, kind, amt, cat, label, desc) = row?;
                wtr.write_record([
                    d,
                    user,
                    kind,
                    amt,
                    cat,
                    label.unwrap_or_default(),
                    desc.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, user, kind, amt, cat, label, desc) = row?;
                items.push(json!({
                    "date": d, "user": user, "kind": kind, "amount": amt,
                    "category": cat, "custom_label": label, "description": desc
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
