//! a one-line unicode bargraph of per-core cpu load.

use {
    cpubgline::{App, Config},
    crossterm::style::Stylize,
    std::{io, process::ExitCode},
};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(Config::log_level())
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let app = App::new(Config::default());
    match app.run(&mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error.to_string().red().bold());
            ExitCode::FAILURE
        }
    }
}
