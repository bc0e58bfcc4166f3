//! edbv GUI - Desktop application entry point.

use eframe::egui;
use edbv::cli;
use edbv::gui::{EdbvGuiApp, app::GuiApp};
use edbv::{logging, startup, update};

fn main() -> eframe::Result<()> {
    let cli = cli::parse_args(std::env::args().skip(1), false).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        eprintln!("{}", cli::usage("edbv-gui", false));
        std::process::exit(1);
    });

    if cli.help {
        println!("{}", cli::usage("edbv-gui", false));
        return Ok(());
    }
    if cli.version {
        println!("edbv-gui {}", update::CURRENT_VERSION);
        return Ok(());
    }

    logging::init(true);

    let startup = startup::build(&cli).unwrap_or_else(|e| {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    });

    let update_rx = if cli.no_update_check {
        None
    } else {
        update::spawn_check(&startup.settings.update)
    };
    let keep_on_top = startup.settings.keep_on_top;
    let app = GuiApp::from_startup(startup, update_rx);

    let mut viewport = egui::ViewportBuilder::default()
        .with_title("Elite Dangerous Bindings Viewer")
        .with_inner_size([1100.0, 720.0])
        .with_min_inner_size([640.0, 360.0]);
    if keep_on_top {
        viewport = viewport.with_always_on_top();
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "edbv",
        options,
        Box::new(move |_cc| Ok(Box::new(EdbvGuiApp::new(app, keep_on_top)))),
    )
}
