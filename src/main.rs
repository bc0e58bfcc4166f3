//! edbv - Elite Dangerous bindings viewer with TUI

use anyhow::Context;
use edbv::cli::{self, Cli};
use edbv::{logging, startup, tui, update};
use edbv_core::storage::export_rows;
use std::env;

fn run(cli: &Cli) -> anyhow::Result<()> {
    let startup = startup::build(cli)?;

    if let Some(output_path) = &cli.output {
        for warning in &startup.warnings {
            eprintln!("Warning: {}", warning);
        }
        let rows = startup.viewer.rows();
        export_rows(output_path, rows)
            .with_context(|| format!("Failed to export to {}", output_path.display()))?;
        println!("Exported {} rows to {}", rows.len(), output_path.display());
        return Ok(());
    }

    let update_rx = if cli.no_update_check {
        None
    } else {
        update::spawn_check(&startup.settings.update)
    };
    let mut app = tui::App::from_startup(startup, update_rx);
    tui::run(&mut app).context("Terminal error")?;
    Ok(())
}

fn main() {
    let cli = match cli::parse_args(env::args().skip(1), true) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", cli::usage("edbv", true));
            std::process::exit(1);
        }
    };

    if cli.help {
        println!("{}", cli::usage("edbv", true));
        return;
    }
    if cli.version {
        println!("edbv {}", update::CURRENT_VERSION);
        return;
    }

    // Console logging would draw over the alternate screen; export mode
    // reports on stderr itself.
    logging::init(false);

    if let Err(e) = run(&cli) {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
