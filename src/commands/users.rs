// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::User;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let username = sub.get_one::<String>("username").unwrap();
            conn.execute(
                "INSERT INTO users(username) VALUES (?1)",
                params![username],
            )?;
            println!("Added user '{}'", username);
        }
        Some(("list", _)) => {
            let mut stmt = conn.prepare(
                "SELECT u.id, u.username, u.created_at, COUNT(t.id)
                 FROM users u LEFT JOIN transactions t ON t.user_id=u.id
                 GROUP BY u.id ORDER BY u.username",
            )?;
            let rows = stmt.query_map([], |r| {
                Ok((
                    User {
                        id: r.get(0)?,
                        username: r.get(1)?,
                    },
                    r.get::<_, String>(2)?,
                    r.get::<_, i64>(3)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (user, created, count) = row?;
                data.push(vec![user.username, created, count.to_string()]);
            }
            println!(
                "{}",
                pretty_table(&["Username", "Created", "Transactions"], data)
            );
        }
        Some(("rm", sub)) => {
            let username = sub.get_one::<String>("username").unwrap();
            conn.execute("DELETE FROM users WHERE username=?1", params![username])?;
            println!("Removed user '{}'", username);
        }
        _ => {}
    }
    Ok(())
}
