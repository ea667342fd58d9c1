// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .short('u')
        .required(true)
        .help("Username owning the transactions")
}

fn category_args() -> [Arg; 2] {
    [
        Arg::new("category")
            .long("category")
            .required(true)
            .help("Fixed category name, or 'custom' with --label"),
        Arg::new("label")
            .long("label")
            .help("Custom category label (only with --category custom)"),
    ]
}

fn tx_entry(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(user_arg())
        .arg(
            Arg::new("date")
                .long("date")
                .required(true)
                .help("Transaction date, YYYY-MM-DD"),
        )
        .arg(
            Arg::new("amount")
                .long("amount")
                .required(true)
                .help("Non-negative amount, e.g. 42.50"),
        )
        .args(category_args())
        .arg(Arg::new("desc").long("desc").help("Description, up to 40 chars"))
}

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .about("Personal finance tracker with period and category summaries")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand(
                    Command::new("add").about("Add a user").arg(
                        Arg::new("username")
                            .required(true)
                            .help("Unique username"),
                    ),
                )
                .subcommand(Command::new("list").about("List users"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a user and their transactions")
                        .arg(Arg::new("username").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(tx_entry("income", "Record an income transaction"))
                .subcommand(tx_entry("expense", "Record an expense transaction"))
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(user_arg())
                        .arg(Arg::new("month").long("month").help("Filter by month YYYY-MM"))
                        .arg(Arg::new("category").long("category").help("Filter by category name"))
                        .arg(Arg::new("label").long("label").help("Custom label filter (with --category custom)"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .help("Show at most N rows"),
                        ),
                ))
                .subcommand(
                    Command::new("delete")
                        .about("Delete transactions by id, pick number or category")
                        .arg(user_arg())
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64))
                                .help("Delete by transaction id"),
                        )
                        .arg(
                            Arg::new("pick")
                                .long("pick")
                                .value_parser(value_parser!(usize))
                                .help("Delete by display number from the grouped view"),
                        )
                        .arg(
                            Arg::new("by")
                                .long("by")
                                .default_value("month")
                                .help("Time unit the pick numbers refer to (day|week|month|year)"),
                        )
                        .arg(Arg::new("category").long("category").help("Delete all in a category"))
                        .arg(Arg::new("label").long("label").help("Custom label (with --category custom)")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries over recorded transactions")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Transactions grouped by time period")
                        .arg(user_arg())
                        .arg(
                            Arg::new("by")
                                .long("by")
                                .default_value("month")
                                .help("Grouping unit: day|week|month|year"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("categories")
                        .about("Income/expense totals per category")
                        .arg(user_arg()),
                ))
                .subcommand(
                    Command::new("balance")
                        .about("Running account balance")
                        .arg(user_arg()),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Category reference")
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List fixed categories and custom labels in use"),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Export transactions to csv or json")
                        .arg(Arg::new("user").long("user").short('u').help("Limit to one user"))
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(
                            Arg::new("out")
                                .long("out")
                                .required(true)
                                .help("Output file path"),
                        ),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored rows against the data model"))
}
