//! Classgen CLI - Generate class skeletons from class-diagram scripts

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();
    let mut app = cli::ClassgenApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
