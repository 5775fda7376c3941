use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lector::app::AppContext;
use lector::cli::{commands, Cli, Commands, WordsAction};
use lector::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let ctx = AppContext::new(config)?;

    match &cli.command {
        Commands::Lesson { source_only } => commands::lesson(&ctx, *source_only).await?,
        Commands::Brief => commands::brief(&ctx).await?,
        Commands::Check => commands::check(&ctx)?,
        Commands::Words { action } => match action {
            WordsAction::Stats => commands::stats(&ctx)?,
            WordsAction::Sample { count, trained } => commands::sample(&ctx, *count, *trained)?,
            WordsAction::Untrained { count } => commands::untrained(&ctx, *count)?,
            WordsAction::Find { word } => commands::find(&ctx, word)?,
            WordsAction::Mark { word } => commands::mark(&ctx, word)?,
            WordsAction::Drill { word } => commands::drill(&ctx, word)?,
            WordsAction::Import { path } => commands::import(&ctx, path)?,
        },
    }

    ctx.close();
    Ok(())
}
