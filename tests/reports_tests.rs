// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use tallybook::summary::{self, TimeUnit};
use tallybook::utils::load_user_transactions;
use tallybook::{cli, commands::reports};

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
        "#,
    )
    .unwrap();
    conn.execute("INSERT INTO users(id, username) VALUES (1, 'ann')", [])
        .unwrap();
    conn
}

fn insert_tx(conn: &Connection, date: &str, kind: &str, amount: &str, category: &str) {
    conn.execute(
        "INSERT INTO transactions(date, kind, amount, category, user_id) VALUES (?1, ?2, ?3, ?4, 1)",
        params![date, kind, amount, category],
    )
    .unwrap();
}

fn report_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args);
    let Some(("report", rep_m)) = matches.subcommand() else {
        panic!("no report subcommand");
    };
    rep_m.clone()
}

#[test]
fn stored_rows_feed_the_summary_engine() {
    let conn = setup();
    // stored newest-first; the loader must hand them over ascending
    insert_tx(&conn, "2024-03-15", "expense", "40", "Food");
    insert_tx(&conn, "2024-03-01", "income", "100", "Savings");

    let txs = load_user_transactions(&conn, 1).unwrap();
    assert_eq!(txs[0].date.to_string(), "2024-03-01");

    let s = summary::group(txs, TimeUnit::Month);
    assert_eq!(s.buckets.len(), 1);
    assert_eq!(s.buckets.keys().next().unwrap().label(), "March 2024");
    assert_eq!(s.total_income, Decimal::from(100));
    assert_eq!(s.total_expense, Decimal::from(40));
    assert_eq!(s.net_result, Decimal::from(60));
}

#[test]
fn summary_report_runs_for_each_unit() {
    let conn = setup();
    insert_tx(&conn, "2024-03-01", "income", "100", "Savings");
    insert_tx(&conn, "2024-03-15", "expense", "40", "Food");

    for unit in ["day", "week", "month", "year"] {
        let rep_m = report_matches(&[
            "tallybook", "report", "summary", "--user", "ann", "--by", unit,
        ]);
        reports::handle(&conn, &rep_m).unwrap();
    }
}

#[test]
fn summary_report_rejects_invalid_unit() {
    let conn = setup();
    insert_tx(&conn, "2024-03-01", "income", "100", "Savings");

    let rep_m = report_matches(&[
        "tallybook", "report", "summary", "--user", "ann", "--by", "fortnight",
    ]);
    assert!(reports::handle(&conn, &rep_m).is_err());
}

#[test]
fn summary_report_tolerates_empty_user() {
    let conn = setup();
    let rep_m = report_matches(&[
        "tallybook", "report", "summary", "--user", "ann", "--by", "month",
    ]);
    reports::handle(&conn, &rep_m).unwrap();
}

#[test]
fn categories_and_balance_reports_run() {
    let conn = setup();
    insert_tx(&conn, "2024-03-01", "income", "100", "Savings");
    insert_tx(&conn, "2024-03-15", "expense", "40", "Food");
    conn.execute(
        "INSERT INTO transactions(date, kind, amount, category, custom_label, user_id)
         VALUES ('2024-03-20', 'expense', '5', 'custom', 'Food', 1)",
        [],
    )
    .unwrap();

    let rep_m = report_matches(&["tallybook", "report", "categories", "--user", "ann"]);
    reports::handle(&conn, &rep_m).unwrap();

    let rep_m = report_matches(&["tallybook", "report", "balance", "--user", "ann"]);
    reports::handle(&conn, &rep_m).unwrap();

    // the aggregation the report renders keeps custom Food apart from fixed Food
    let txs = load_user_transactions(&conn, 1).unwrap();
    let totals = summary::aggregate_by_category(&txs);
    assert_eq!(totals.len(), 3);
}
