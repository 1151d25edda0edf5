//! ipbans - operator command line for the IP ban file.

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use ipbans::config::Config;
use ipbans::duration::parse_duration;
use ipbans::store::parse_timestamp;
use ipbans::telemetry::{self, spans};
use ipbans::{AddBanOptions, BanRecord, BanStore, BanStoreConfig, TracingLogger};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Instrument, error, info};

#[derive(Debug, Parser)]
#[command(name = "ipbans", version, about = "Manage a file-backed IP ban list")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the ban file (overrides the config file).
    #[arg(long, global = true)]
    security_dir: Option<PathBuf>,

    /// Ban file name (overrides the config file).
    #[arg(long, global = true)]
    ban_file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report whether an address is currently banned.
    Check { address: String },
    /// Ban an address.
    Add {
        address: String,
        #[arg(long)]
        reason: Option<String>,
        /// Who is issuing the ban.
        #[arg(long = "by")]
        banned_by: Option<String>,
        /// Expiry as an ISO-8601 date-time (UTC unless zoned) or a YYYY-MM-DD date.
        #[arg(long, conflicts_with = "duration")]
        expires_at: Option<String>,
        /// Lifetime such as 2w, 30d, 12h or 45m. 0 means permanent.
        #[arg(long)]
        duration: Option<String>,
        /// Lower bound of an additional banned range.
        #[arg(long, requires = "range_end")]
        range_start: Option<String>,
        /// Upper bound of an additional banned range.
        #[arg(long, requires = "range_start")]
        range_end: Option<String>,
    },
    /// Remove every ban for an exact address.
    Remove { address: String },
    /// Deactivate the first ban for an exact address.
    Deactivate { address: String },
    /// List bans that are active and not expired.
    List {
        /// Print the records as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Drop expired bans from the file.
    Cleanup,
    /// Print the effective configuration.
    Config,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Check { .. } => "check",
            Command::Add { .. } => "add",
            Command::Remove { .. } => "remove",
            Command::Deactivate { .. } => "deactivate",
            Command::List { .. } => "list",
            Command::Cleanup => "cleanup",
            Command::Config => "config",
        }
    }

    fn address(&self) -> Option<&str> {
        match self {
            Command::Check { address }
            | Command::Add { address, .. }
            | Command::Remove { address }
            | Command::Deactivate { address } => Some(address.as_str()),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let file_config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    telemetry::init(&file_config.log);

    let mut store = BanStore::new(file_config.store_overrides());
    store.configure(BanStoreConfig {
        security_dir: cli.security_dir.clone(),
        ban_file_name: cli.ban_file.clone(),
        logger: Some(Arc::new(TracingLogger)),
        id_generator: None,
    });

    let span = spans::command(
        cli.command.name(),
        &store.ban_file_path(),
        cli.command.address(),
    );
    if let Err(e) = run(&store, cli.command).instrument(span).await {
        error!(error = %e, "Command failed");
        return Err(e);
    }
    Ok(())
}

async fn run(store: &BanStore, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Check { address } => {
            let banned = store.is_banned(&address).await;
            println!("{}", if banned { "banned" } else { "not banned" });
        }
        Command::Add {
            address,
            reason,
            banned_by,
            expires_at,
            duration,
            range_start,
            range_end,
        } => {
            let options = AddBanOptions {
                reason,
                banned_by,
                expires_at: resolve_expiry(expires_at.as_deref(), duration.as_deref())?,
                ip_range_start: range_start,
                ip_range_end: range_end,
            };
            let ban = store.add_ban(&address, options).await?;
            info!(id = %ban.id, ip = %ban.ip_address, "Ban added");
            println!("{}", ban.id);
        }
        Command::Remove { address } => {
            let removed = store.remove_ban(&address).await?;
            println!("removed {removed}");
        }
        Command::Deactivate { address } => {
            let found = store.deactivate_ban(&address).await?;
            if found {
                println!("deactivated {address}");
            } else {
                println!("no ban for {address}");
            }
        }
        Command::List { json } => {
            let bans = store.list_active_bans().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&bans)?);
            } else {
                for ban in &bans {
                    println!("{}", describe(ban));
                }
            }
        }
        Command::Cleanup => {
            let removed = store.cleanup_expired_bans().await?;
            println!("removed {removed}");
        }
        Command::Config => {
            let resolved = store.config().resolve();
            println!("security_dir = {}", resolved.security_dir.display());
            println!("ban_file_name = {}", resolved.ban_file_name);
            println!("ban_file = {}", resolved.ban_file_path().display());
        }
    }
    Ok(())
}

fn resolve_expiry(
    expires_at: Option<&str>,
    duration: Option<&str>,
) -> anyhow::Result<Option<DateTime<Utc>>> {
    if let Some(raw) = expires_at {
        return match parse_timestamp(raw) {
            Some(at) => Ok(Some(at)),
            None => bail!("invalid --expires-at timestamp: {raw}"),
        };
    }
    let Some(raw) = duration else {
        return Ok(None);
    };
    let lifetime = parse_duration(raw).with_context(|| format!("invalid --duration '{raw}'"))?;
    match lifetime {
        Some(d) => Utc::now()
            .checked_add_signed(d)
            .map(Some)
            .with_context(|| format!("--duration '{raw}' expires beyond the supported date range")),
        None => Ok(None),
    }
}

fn describe(ban: &BanRecord) -> String {
    let mut line = format!("{}  {}", ban.id, ban.ip_address);
    if let Some((start, end)) = ban.range() {
        line.push_str(&format!("  range={start}..{end}"));
    }
    if let Some(expires_at) = &ban.expires_at {
        line.push_str(&format!("  expires={expires_at}"));
    }
    if let Some(by) = &ban.banned_by {
        line.push_str(&format!("  by={by}"));
    }
    if let Some(reason) = &ban.reason {
        line.push_str(&format!("  reason={reason:?}"));
    }
    line
}
