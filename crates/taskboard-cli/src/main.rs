mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use taskboard_core::AppConfig;
use taskboard_tui::{App, Controller, FileDataUriDecoder};

fn init_logging() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TASKBOARD_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }
    Ok(())
}

async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let command = match cli.command {
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "taskboard",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        other => other,
    };

    let path = context::resolve_store_path(cli.file, &config)?;
    let repo = context::open_repository(path, &config);

    match command {
        None => {
            let controller = Controller::load(repo, FileDataUriDecoder).await?;
            App::new(controller).run().await?;
        }
        Some(Commands::Task(cmd)) => handlers::task::handle(&repo, cmd.action).await?,
        Some(Commands::Checklist(cmd)) => handlers::checklist::handle(&repo, cmd.action).await?,
        Some(Commands::Image(cmd)) => handlers::image::handle(&repo, cmd.action).await?,
        Some(Commands::Comment(cmd)) => handlers::comment::handle(&repo, cmd.action).await?,
        Some(Commands::Board) => handlers::board::handle(&repo).await?,
        Some(Commands::Completions { .. }) => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let config = AppConfig::load();
    let interactive = cli.command.is_none();

    if let Err(e) = run(cli, config).await {
        if interactive {
            return Err(e);
        }
        tracing::debug!("Command failed: {:#}", e);
        output::output_error(&e.to_string());
    }
    Ok(())
}
