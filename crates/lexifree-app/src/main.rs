use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod controller;
mod io;
mod profile;
mod state;
mod status;

#[cfg(test)]
mod tests;

use self::cli::{Cli, Commands, LogFormat};
use self::state::AppState;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_format);

    if let Err(err) = run(cli).await {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = profile::load_config(cli.config.as_deref())?;
    let state = AppState::new(config);

    match cli.command {
        Commands::Build(args) => commands::build::run(&state, args).await,
        Commands::Eval(args) => commands::eval::run(&state, args).await,
        Commands::MakeTest(args) => commands::make_test::run(&state, args).await,
        Commands::Cost(args) => commands::cost::run(&state, args),
        Commands::Show(args) => commands::show::run(&state, args),
        Commands::Reversion(args) => commands::reversion::run(&state, args),
    }
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
