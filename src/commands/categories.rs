// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");

            let mut data: Vec<Vec<String>> = Category::FIXED
                .iter()
                .map(|c| vec![c.to_string(), "fixed".into()])
                .collect();

            // Custom labels currently present in stored transactions
            let mut stmt = conn.prepare(
                "SELECT DISTINCT custom_label FROM transactions
                 WHERE custom_label IS NOT NULL ORDER BY custom_label",
            )?;
            let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
            for row in rows {
                data.push(vec![row?, "custom".into()]);
            }

            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                println!("{}", pretty_table(&["Category", "Kind"], data));
            }
        }
        _ => {}
    }
    Ok(())
}
