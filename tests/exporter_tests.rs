// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use tallybook::{cli, commands::exporter};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE users(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE TABLE transactions(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            kind TEXT NOT NULL,
            amount TEXT NOT NULL,
            category TEXT NOT NULL,
            custom_label TEXT,
            description TEXT NOT NULL DEFAULT 'N/A',
            user_id INTEGER NOT NULL
        );
        INSERT INTO users(id, username) VALUES (1, 'ann'), (2, 'bob');
        INSERT INTO transactions(date, kind, amount, category, custom_label, description, user_id) VALUES
            ('2025-01-02', 'income', '100.00', 'Savings', NULL, 'salary', 1),
            ('2025-01-03', 'expense', '12.50', 'custom', 'Dog food', 'N/A', 1),
            ('2025-01-04', 'expense', '9.99', 'Food', NULL, 'N/A', 2);
        "#,
    )
    .unwrap();
    conn
}

fn export_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args);
    let Some(("export", exp_m)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    exp_m.clone()
}

#[test]
fn export_csv_writes_all_rows() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("txs.csv");

    let exp_m = export_matches(&[
        "tallybook",
        "export",
        "transactions",
        "--format",
        "csv",
        "--out",
        out.to_str().unwrap(),
    ]);
    exporter::handle(&conn, &exp_m).unwrap();

    let body = std::fs::read_to_string(&out).unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,user,kind,amount,category,custom_label,description"
    );
    assert_eq!(lines.clone().count(), 3);
    assert!(body.contains("2025-01-03,ann,expense,12.50,custom,Dog food,N/A"));
}

#[test]
fn export_csv_can_limit_to_one_user() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ann.csv");

    let exp_m = export_matches(&[
        "tallybook",
        "export",
        "transactions",
        "--user",
        "ann",
        "--format",
        "csv",
        "--out",
        out.to_str().unwrap(),
    ]);
    exporter::handle(&conn, &exp_m).unwrap();

    let body = std::fs::read_to_string(&out).unwrap();
    assert_eq!(body.lines().count(), 3); // header + 2 rows
    assert!(!body.contains("bob"));
}

#[test]
fn export_json_is_valid_and_complete() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("txs.json");

    let exp_m = export_matches(&[
        "tallybook",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        out.to_str().unwrap(),
    ]);
    exporter::handle(&conn, &exp_m).unwrap();

    let body = std::fs::read_to_string(&out).unwrap();
    let items: serde_json::Value = serde_json::from_str(&body).unwrap();
    let arr = items.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[1]["custom_label"], "Dog food");
    assert_eq!(arr[0]["user"], "ann");
}
