// Entrypoint for the course registration CLI.
// - Keeps `main` small: build the config and a stdio console, then hand both
//   to the menu loop.
// - Logging goes to stderr and is off unless `RUST_LOG` is set.

use course_registration::{config::Config, ui::{main_menu, Console}};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Data file from `ENROLLMENTS_FILE`, defaulting to Enrollments.json.
    let config = Config::from_env();
    log::info!("using data file {}", config.data_file().display());

    // Blocks until the user picks "4" or stdin is closed.
    let mut console = Console::stdio();
    main_menu(&mut console, &config)?;
    Ok(())
}
