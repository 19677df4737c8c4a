// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::recurring::MAX_PROJECTION_MONTHS;
use clap::{Arg, ArgAction, Command, crate_version};

fn loan_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("principal")
            .long("principal")
            .required(true)
            .allow_hyphen_values(true),
    )
    .arg(
        Arg::new("rate")
            .long("rate")
            .required(true)
            .allow_hyphen_values(true)
            .help("Annual interest rate in percent, e.g. 12 for 12%"),
    )
    .arg(
        Arg::new("months")
            .long("months")
            .required(true)
            .value_parser(clap::value_parser!(u32)),
    )
    .arg(
        Arg::new("type")
            .long("type")
            .default_value("amortized")
            .help("simple | amortized"),
    )
}

fn tx_filter_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("type").long("type").help("income | expense"))
        .arg(
            Arg::new("category")
                .long("category")
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(i64))
                .help("Category id; 0 selects uncategorized"),
        )
        .arg(
            Arg::new("account")
                .long("account")
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(Arg::new("search").long("search"))
        .arg(
            Arg::new("sort")
                .long("sort")
                .default_value("date-desc")
                .help("date-desc | date-asc | amount-desc | amount-asc"),
        )
}

pub fn build_cli() -> Command {
    Command::new("finboard")
        .version(crate_version!())
        .about("Personal finance dashboard: loans, debts, budgets, goals and projections")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("jsonl")
                .long("jsonl")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .global(true)
                .help("Evaluate as of this date (YYYY-MM-DD)"),
        )
        .subcommand(Command::new("init").about("Create the local store"))
        .subcommand(
            Command::new("session")
                .about("Server connection and preferences")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("set-url").arg(Arg::new("url").required(true)))
                .subcommand(
                    Command::new("set-token")
                        .arg(Arg::new("access").required(true))
                        .arg(Arg::new("refresh").long("refresh")),
                )
                .subcommand(Command::new("theme").arg(Arg::new("theme").help("light | dark | toggle")))
                .subcommand(Command::new("currency").arg(Arg::new("code").required(true)))
                .subcommand(Command::new("logout")),
        )
        .subcommand(
            Command::new("sync").about("Refresh the local mirror from the server").arg(
                Arg::new("only")
                    .long("only")
                    .action(ArgAction::Append)
                    .help("Resource to fetch (repeatable); default all"),
            ),
        )
        .subcommand(loan_args(
            Command::new("loan").about("Quote a loan's monthly payment"),
        ))
        .subcommand(
            Command::new("debt")
                .subcommand(Command::new("list"))
                .subcommand(Command::new("upcoming"))
                .subcommand(
                    loan_args(Command::new("create"))
                        .arg(Arg::new("creditor").long("creditor").required(true))
                        .arg(Arg::new("start").long("start").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("notes").long("notes")),
                ),
        )
        .subcommand(
            Command::new("budget")
                .subcommand(Command::new("status"))
                .subcommand(Command::new("warnings")),
        )
        .subcommand(Command::new("goal").subcommand(Command::new("list")))
        .subcommand(
            Command::new("tx")
                .subcommand(tx_filter_args(Command::new("list")))
                .subcommand(tx_filter_args(Command::new("stats"))),
        )
        .subcommand(
            Command::new("recurring")
                .subcommand(Command::new("summary"))
                .subcommand(
                    Command::new("project")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .default_value("12")
                                .value_parser(
                                    clap::value_parser!(u32)
                                        .range(1..=i64::from(MAX_PROJECTION_MONTHS)),
                                ),
                        )
                        .arg(
                            Arg::new("no-variable")
                                .long("no-variable")
                                .action(ArgAction::SetTrue)
                                .help("Leave average variable spending out"),
                        ),
                ),
        )
        .subcommand(Command::new("account").subcommand(Command::new("list")))
        .subcommand(
            Command::new("transfer").subcommand(
                Command::new("list").arg(
                    Arg::new("account")
                        .long("account")
                        .value_parser(clap::value_parser!(i64))
                        .help("Only transfers into or out of this account"),
                ),
            ),
        )
        .subcommand(
            Command::new("investment").subcommand(
                Command::new("list")
                    .arg(Arg::new("type").long("type").help("goal | insurance")),
            ),
        )
        .subcommand(
            Command::new("trends")
                .about("Monthly spending per category")
                .subcommand(
                    Command::new("category")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .default_value("6")
                                .value_parser(clap::value_parser!(u32))
                                .help("3 | 6 | 12"),
                        ),
                )
                .subcommand(Command::new("categories").about("Categories with an active budget")),
        )
        .subcommand(Command::new("dashboard").about("Thirty-day overview"))
        .subcommand(
            Command::new("export").subcommand(
                tx_filter_args(Command::new("transactions"))
                    .arg(Arg::new("format").long("format").required(true))
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
}
