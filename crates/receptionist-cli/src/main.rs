//! Receptionist CLI - Call log inspection
//!
//! Read-only view of the calls the receptionist has answered.

mod api;
mod config;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use api::{CallRecord, ReceptionistClient};
use config::Config;

#[derive(Parser)]
#[command(name = "receptionist")]
#[command(about = "Receptionist CLI - Inspect answered calls", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recent calls
    Logs {
        /// Number of calls to fetch (1-100)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Only show important calls
        #[arg(short, long)]
        important: bool,
    },

    /// Show call statistics
    Stats,

    /// Check that the server is reachable
    Health,

    /// Show or update configuration
    Config {
        /// Server base URL to store
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Logs { limit, important } => cmd_logs(limit, important).await,
        Commands::Stats => cmd_stats().await,
        Commands::Health => cmd_health().await,
        Commands::Config { base_url } => cmd_config(base_url),
    }
}

// ============================================
// Command Implementations
// ============================================

fn client() -> Result<ReceptionistClient> {
    let config = Config::load()?;
    Ok(ReceptionistClient::new(&config.base_url))
}

async fn cmd_logs(limit: Option<usize>, important: bool) -> Result<()> {
    let response = client()?.call_logs(limit).await?;
    let calls = select_calls(&response.logs, important);

    if calls.is_empty() {
        println!("No calls found.");
        return Ok(());
    }

    println!("{}", "Recent calls:".bold());
    for call in calls {
        let marker = if call.is_important {
            "!".red().bold()
        } else {
            " ".normal()
        };

        println!(
            "  {} {} {} {} [{}] {}s",
            marker,
            call.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            call.caller.cyan(),
            call.caller_number.dimmed(),
            call.sentiment,
            call.duration
        );
        println!("      {} - {}", call.topic.bold(), truncate_string(&call.transcript, 60).dimmed());
    }

    Ok(())
}

async fn cmd_stats() -> Result<()> {
    let stats = client()?.call_logs(Some(1)).await?.stats;

    println!("{}", "Call statistics:".bold());
    println!("  Total calls:      {}", stats.total_calls.to_string().cyan());
    println!("  Important calls:  {}", stats.important_calls.to_string().red());
    println!("  Average duration: {}s", stats.average_duration);

    Ok(())
}

async fn cmd_health() -> Result<()> {
    print!("Checking server... ");

    match client()?.health().await {
        Ok(health) if health.status == "ok" => {
            println!("{} (v{})", "OK".green(), health.version);
            Ok(())
        }
        Ok(health) => {
            println!("{}", "Degraded".yellow());
            bail!("Server reported status '{}'", health.status);
        }
        Err(e) => {
            println!("{}", "Failed".red());
            Err(e)
        }
    }
}

fn cmd_config(base_url: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(url) = base_url {
        config.set_base_url(&url);
        config.save()?;
        println!("{} Base URL set to {}", "✓".green(), config.base_url);
        return Ok(());
    }

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);

    Ok(())
}

fn select_calls(calls: &[CallRecord], important_only: bool) -> Vec<&CallRecord> {
    calls
        .iter()
        .filter(|c| !important_only || c.is_important)
        .collect()
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn call(sid: &str, is_important: bool) -> CallRecord {
        CallRecord {
            call_sid: sid.to_string(),
            caller: "Unknown".to_string(),
            caller_number: "+15551234567".to_string(),
            topic: "Topic".to_string(),
            is_important,
            sentiment: "neutral".to_string(),
            transcript: "hello".to_string(),
            duration: 0,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_select_important_calls() {
        let calls = vec![call("CA1", false), call("CA2", true)];

        assert_eq!(select_calls(&calls, false).len(), 2);

        let important = select_calls(&calls, true);
        assert_eq!(important.len(), 1);
        assert_eq!(important[0].call_sid, "CA2");
    }

    #[test]
    fn test_truncate_string_counts_chars() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("السلام عليكم", 6), "السلام...");
    }
}
