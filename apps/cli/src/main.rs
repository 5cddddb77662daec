use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use decoded_core::{
    ApiService, EpisodeConfig, Layout, Settings, TopicSelection, format_plan_readable, save_plan,
};

use crate::cli::{Cli, Command, PlanArgs};

mod cli;

fn init_tracing(cli: &Cli, settings: &Settings) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level_filter(&settings.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_settings(config_file: &Path) -> Result<Settings> {
    Settings::load(config_file)
        .with_context(|| format!("Failed to load settings from {}", config_file.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let layout = cli
        .base_dir
        .clone()
        .map(Layout::new)
        .unwrap_or_default();
    let config_file = cli.config.clone().unwrap_or_else(|| layout.config_file());

    let settings = load_settings(&config_file)?;
    init_tracing(&cli, &settings);
    tracing::debug!("Settings file: {}", config_file.display());

    match &cli.command {
        Command::Plan(args) => plan(&cli, settings, args).await?,
        Command::Init => init(&layout)?,
        Command::Check => check(),
        Command::Sources => sources(&settings, &layout),
    }

    Ok(())
}

async fn plan(cli: &Cli, mut settings: Settings, args: &PlanArgs) -> Result<()> {
    if let Some(minutes) = args.duration {
        settings.duration_minutes = minutes;
    }
    settings.optional_sections = args.optional_sections(settings.optional_sections);

    let topics = match &args.topics {
        Some(list) => TopicSelection::parse(list),
        None => settings.topics(),
    };
    let episode = EpisodeConfig::build(
        &settings.title,
        settings.duration_minutes,
        settings.optional_sections,
        topics,
    );

    if let Some(adjustment) = &episode.duration_adjustment
        && !cli.quiet
    {
        eprintln!("{} {}", style("Note:").yellow().bold(), adjustment);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&episode)?);
    } else if !cli.quiet {
        println!(
            "\n{}  {}\n",
            style("decoded").cyan().bold(),
            style("Episode Planner").dim()
        );
        println!("{}", style("─".repeat(60)).dim());
        println!("{}", format_plan_readable(&episode));
    }

    if let Some(path) = &args.out {
        save_plan(&episode, path).await?;
        if !cli.quiet {
            println!("{} {}", style("Saved:").dim(), style(path.display()).cyan());
        }
    }

    Ok(())
}

fn init(layout: &Layout) -> Result<()> {
    layout.ensure()?;
    println!(
        "{} Directories ready under {}",
        style("✓").green().bold(),
        style(layout.base_dir().display()).cyan()
    );
    for dir in layout.directories() {
        println!("  {}", style(dir.display()).dim());
    }
    Ok(())
}

fn check() {
    for service in ApiService::ALL {
        match service.validate_credentials() {
            Ok(_) => println!("{} {}", style("✓").green().bold(), service.name()),
            Err(e) => println!("{} {}", style("✗").red().bold(), style(e).dim()),
        }
    }
}

fn sources(settings: &Settings, layout: &Layout) {
    let sources = &settings.sources;
    println!(
        "{} {}",
        style("Enabled sources:").bold(),
        sources.enabled_sources().join(", ")
    );

    println!("\n{}", style("Feeds").bold());
    for url in sources.enabled_feed_urls() {
        println!("  {}", url);
    }

    if sources.kaggle.enabled {
        println!(
            "\n{} {}",
            style("Kaggle credentials:").bold(),
            layout.resolve(&sources.kaggle.kaggle_json_path).display()
        );
    }
}
