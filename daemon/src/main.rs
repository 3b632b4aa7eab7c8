//! Franchise daemon: entry point for deploying an election system.

use anyhow::Context;
use clap::Parser;
use franchise_system::{ElectionSystem, SystemConfig, SystemSummary};
use franchise_types::{ActorId, Clock, SystemClock, Timestamp};
use franchise_utils::{format_duration, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "franchise-daemon", about = "Franchise election system daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "FRANCHISE_CONFIG")]
    config: Option<PathBuf>,

    /// Deploying actor, who becomes the commissioner.
    #[arg(long, env = "FRANCHISE_COMMISSIONER")]
    commissioner: Option<String>,

    /// Hex-encoded 32-byte public key of the commissioner; the commissioner
    /// identity is derived from it.
    #[arg(long, env = "FRANCHISE_COMMISSIONER_KEY", conflicts_with = "commissioner")]
    commissioner_key: Option<String>,

    /// Opening of the voting window, Unix seconds.
    #[arg(long, env = "FRANCHISE_ELECTION_START")]
    election_start: Option<u64>,

    /// Close of the voting window (exclusive), Unix seconds.
    #[arg(long, env = "FRANCHISE_ELECTION_END")]
    election_end: Option<u64>,

    /// Log format: "human" or "json".
    #[arg(long, env = "FRANCHISE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "FRANCHISE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Bootstrap the system from the resolved configuration and print a summary.
    Bootstrap {
        /// Evaluate the election phase at this Unix time instead of the wall clock.
        #[arg(long, env = "FRANCHISE_NOW")]
        now: Option<u64>,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Validate the resolved configuration and print it as TOML.
    CheckConfig,
    /// Print the default configuration as TOML.
    DefaultConfig,
    /// Print the actor identity derived from a hex-encoded 32-byte public key.
    DeriveIdentity {
        /// Public key, 64 hex characters.
        public_key: String,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<SystemConfig> {
    let file_config = match &cli.config {
        Some(path) => SystemConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config file {}", path.display()))?,
        None => SystemConfig::default(),
    };

    let commissioner = match (cli.commissioner.as_deref(), cli.commissioner_key.as_deref()) {
        (Some(raw), _) => ActorId::parse(raw).context("invalid --commissioner")?,
        (None, Some(key)) => {
            ActorId::from_public_key_hex(key).context("invalid --commissioner-key")?
        }
        (None, None) => file_config.commissioner.clone(),
    };
    Ok(SystemConfig {
        commissioner,
        election_start: cli
            .election_start
            .map(Timestamp::new)
            .unwrap_or(file_config.election_start),
        election_end: cli
            .election_end
            .map(Timestamp::new)
            .unwrap_or(file_config.election_end),
        log_format: cli.log_format.unwrap_or(file_config.log_format),
        log_level: cli
            .log_level
            .clone()
            .unwrap_or_else(|| file_config.log_level.clone()),
        ..file_config
    })
}

fn print_summary(summary: &SystemSummary, now: Timestamp) {
    let window = summary.election_start.elapsed_since(summary.election_end);
    println!("commissioner:       {}", summary.commissioner);
    println!("authority:          {}", summary.authority);
    println!("voter registry:     {}", summary.voter_registry);
    println!("candidate registry: {}", summary.candidate_registry);
    println!("coordinator:        {}", summary.coordinator);
    println!(
        "window:             [{}, {}) ({})",
        summary.election_start,
        summary.election_end,
        format_duration(window)
    );
    println!("phase at {now}:   {}", summary.phase);
    println!(
        "params:             voter age >= {}, candidate age >= {}, refund threshold {} bps",
        summary.params.min_voter_age,
        summary.params.min_candidate_age,
        summary.params.deposit_forfeiture_threshold_bps
    );
    println!("officers:           {}", summary.officers.len());
    for (officer, constituency) in &summary.officers {
        println!("  {constituency}: {officer}");
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    franchise_utils::init_logging(config.log_format, &config.log_level);

    match cli.command {
        Command::Bootstrap { now, json } => {
            let now = now.map(Timestamp::new).unwrap_or_else(|| SystemClock.now());
            tracing::info!(
                coordinator = %config.coordinator_id,
                officers = config.officers.len(),
                "bootstrapping election system"
            );
            let system = ElectionSystem::bootstrap(&config).context("bootstrap failed")?;
            let summary = system.summary(now);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary, now);
            }
        }
        Command::CheckConfig => {
            config.validate().context("invalid configuration")?;
            print!("{}", config.to_toml_string()?);
            tracing::info!("configuration is valid");
        }
        Command::DefaultConfig => {
            print!("{}", SystemConfig::default().to_toml_string()?);
        }
        Command::DeriveIdentity { public_key } => {
            let actor =
                ActorId::from_public_key_hex(&public_key).context("invalid public key")?;
            println!("{actor}");
        }
    }

    Ok(())
}
