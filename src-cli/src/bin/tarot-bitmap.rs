use std::process::ExitCode;

use clap::Parser;

use tarot_bitmap_lib::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    tarot_bitmap_lib::init_tracing(cli.verbose);

    match tarot_bitmap_lib::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
