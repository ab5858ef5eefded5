use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

mod app;
mod config;
mod events;
mod logging;
mod panels;
mod resolver;
mod scheduler;
mod session;
mod tui;
mod ui;

use config::Config;
use logging::LogTarget;
use panels::{QUICK_ACTIONS, STATUS_CARDS};
use resolver::Topic;

#[derive(Parser)]
#[command(name = "campus-assistant")]
#[command(version)]
#[command(about = "Smart campus assistant for the terminal", long_about = None)]
struct Cli {
    /// Config file (default: ~/.campus-assistant/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the reply delay in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer one question and exit
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Print a JSON object instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// List the quick actions
    Actions,
    /// Show campus service status
    Status,
    /// Print the effective configuration
    Config {
        /// Write it to the config file as well
        #[arg(long)]
        write: bool,
    },
}

#[derive(Serialize)]
struct Answer<'a> {
    query: &'a str,
    topic: Topic,
    response: &'static str,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(delay_ms) = cli.delay_ms {
        config.reply_delay_ms = delay_ms;
    }
    Ok(config)
}

fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => Ok(Config::home_dir()?.join("config.toml")),
    }
}

fn ask(query: &str, json: bool) -> Result<()> {
    let topic = resolver::classify(query);
    tracing::debug!(topic = topic.slug(), "answering one-shot question");

    if json {
        let answer = Answer {
            query,
            topic,
            response: topic.response(),
        };
        let output = serde_json::to_string_pretty(&answer).context("Failed to serialize answer")?;
        println!("{}", output);
    } else {
        println!("{}", topic.response());
    }
    Ok(())
}

fn list_actions() {
    println!("⚡ Quick Actions:\n");
    for (index, action) in QUICK_ACTIONS.iter().enumerate() {
        println!("  F{}  {} {:<20} \"{}\" -> {}", index + 1, action.icon, action.label, action.query, action.topic().slug());
    }
}

fn list_status() {
    println!("🏫 Campus Services:\n");
    for card in STATUS_CARDS.iter() {
        println!("  {} {:<18} [{}] {}", card.icon, card.title, card.status, card.description);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let target = if cli.command.is_none() { LogTarget::File } else { LogTarget::Stderr };
    logging::init(&config, target)?;

    match &cli.command {
        None => app::App::run(config).await?,
        Some(Commands::Ask { query, json }) => ask(&query.join(" "), *json)?,
        Some(Commands::Actions) => list_actions(),
        Some(Commands::Status) => list_status(),
        Some(Commands::Config { write }) => {
            print!("{}", config.to_toml()?);
            if *write {
                let path = config_path(&cli)?;
                config.save_to(&path)?;
                eprintln!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn ask_joins_words_and_accepts_global_flags() {
        let cli = Cli::try_parse_from(["campus-assistant", "ask", "where", "is", "food", "--json", "--delay-ms", "5"]).unwrap();
        assert_eq!(cli.delay_ms, Some(5));
        match cli.command {
            Some(Commands::Ask { query, json }) => {
                assert_eq!(query.join(" "), "where is food");
                assert!(json);
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn delay_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "reply_delay_ms = 900\n").unwrap();

        let cli = Cli::try_parse_from([
            "campus-assistant",
            "--config",
            path.to_str().unwrap(),
            "--delay-ms",
            "20",
            "status",
        ])
        .unwrap();
        assert_eq!(load_config(&cli).unwrap().reply_delay_ms, 20);
    }

    #[test]
    fn answer_serializes_topic_slug() {
        let answer = Answer {
            query: "class",
            topic: Topic::Schedule,
            response: Topic::Schedule.response(),
        };
        let value = serde_json::to_value(&answer).unwrap();
        assert_eq!(value["topic"], "schedule");
        assert_eq!(value["query"], "class");
    }
}
