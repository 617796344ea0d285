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
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("quantmaster")
        .version(clap::crate_version!())
        .about("Monthly finance snapshots, loan ledger and settings")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .default_value(crate::config::DEFAULT_CONFIG_FILE)
                .help("Path to the TOML config file"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Database file (overrides config and QUANTMASTER_DB)"),
        )
        .subcommand(Command::new("init").about("Create the database if needed"))
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP API")
                .arg(Arg::new("host").long("host"))
                .arg(
                    Arg::new("port")
                        .long("port")
                        .value_parser(value_parser!(u16)),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Show or change app settings")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("webhook_url").long("webhook-url"))
                        .arg(Arg::new("provident_goal").long("provident-goal"))
                        .arg(Arg::new("withdrawal").long("withdrawal"))
                        .arg(Arg::new("cash_goal").long("cash-goal"))
                        .arg(
                            Arg::new("auto_fill")
                                .long("auto-fill")
                                .value_parser(value_parser!(bool)),
                        ),
                ),
        )
        .subcommand(
            Command::new("loans")
                .about("Global loan ledger")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("import")
                        .about("Replace the whole ledger with a JSON array of loans")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("records")
                .about("Monthly records")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("list")))
                .subcommand(json_flags(
                    Command::new("show").arg(Arg::new("month").long("month").required(true)),
                ))
                .subcommand(
                    Command::new("save")
                        .about("Save one record from a JSON file")
                        .arg(Arg::new("path").long("path").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true))),
        )
        .subcommand(
            Command::new("report")
                .about("Derived metrics")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("summary"))),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand_required(true)
                .subcommand(
                    Command::new("records")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_parser(["csv", "json"])
                                .default_value("csv"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
}
