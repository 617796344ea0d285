// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;

use quantmaster::{cli, commands, config::Config, db, logging, server};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or(quantmaster::config::DEFAULT_CONFIG_FILE);
    let mut config = Config::load(Path::new(config_path))?;
    logging::init(&config.logging)?;

    let db_path = config.resolve_db_path(matches.get_one::<String>("db").map(String::as_str))?;

    if let Some(("serve", sub)) = matches.subcommand() {
        if let Some(host) = sub.get_one::<String>("host") {
            config.server.host = host.clone();
        }
        if let Some(port) = sub.get_one::<u16>("port") {
            config.server.port = *port;
        }
        let addr = config.listen_addr()?;
        let rt = tokio::runtime::Runtime::new()?;
        return rt.block_on(server::run_server(db_path, addr));
    }

    let mut conn = db::open_or_init(&db_path)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db_path.display());
        }
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("loans", sub)) => commands::loans::handle(&mut conn, sub)?,
        Some(("records", sub)) => commands::records::handle(&mut conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
