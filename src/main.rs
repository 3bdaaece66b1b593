use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use depgroup::config::{GeneratorConfig, ScheduleConfig};
use depgroup::detect::signatures;
use depgroup::ecosystems::ALL_ECOSYSTEMS;
use depgroup::orchestrator::build_project_config;
use depgroup::reports::render_summary;

#[derive(Parser)]
#[command(name = "depgroup")]
#[command(about = "Framework-aware dependency update-config generator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a project and generate the update configuration (default)
    Generate {
        /// Project root directory to scan
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Output format: yaml, json, or summary
        #[arg(short, long, default_value = "yaml")]
        output: String,

        /// Update interval: daily, weekly, or monthly
        #[arg(long, default_value = "weekly")]
        interval: String,

        /// Day of week for weekly schedules
        #[arg(long)]
        day: Option<String>,

        /// Time of day (HH:MM) for updates
        #[arg(long)]
        time: Option<String>,

        /// Labels attached to update pull requests
        #[arg(long, default_value = "dependencies")]
        labels: Vec<String>,

        /// Open pull-request limit per ecosystem
        #[arg(long, default_value = "10")]
        pr_limit: u32,

        /// Emit a single ungrouped entry per ecosystem instead of groups
        #[arg(long)]
        ungrouped: bool,
    },
    /// List the known framework signatures per ecosystem
    Frameworks,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Some(Commands::Generate {
            dir,
            output,
            interval,
            day,
            time,
            labels,
            pr_limit,
            ungrouped,
        }) => {
            run_generate(GenerateArgs {
                dir,
                output,
                interval,
                day,
                time,
                labels,
                pr_limit,
                ungrouped,
            })
            .await
        }
        Some(Commands::Frameworks) => {
            run_frameworks();
            Ok(())
        }
        None => {
            run_generate(GenerateArgs {
                dir: PathBuf::from("."),
                output: "yaml".to_string(),
                interval: "weekly".to_string(),
                day: None,
                time: None,
                labels: vec!["dependencies".to_string()],
                pr_limit: 10,
                ungrouped: false,
            })
            .await
        }
    }
}

struct GenerateArgs {
    dir: PathBuf,
    output: String,
    interval: String,
    day: Option<String>,
    time: Option<String>,
    labels: Vec<String>,
    pr_limit: u32,
    ungrouped: bool,
}

async fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    if !args.dir.is_dir() {
        bail!("not a directory: {}", args.dir.display());
    }

    let config = GeneratorConfig {
        schedule: ScheduleConfig {
            interval: args.interval,
            day: args.day,
            time: args.time,
        },
        labels: args.labels,
        pr_limit: args.pr_limit,
        grouping: !args.ungrouped,
    };

    tracing::info!(dir = %args.dir.display(), "scanning project");
    let project = build_project_config(&args.dir, &config).await;

    match args.output.as_str() {
        "json" => {
            let json = project
                .to_json()
                .context("failed to serialize update config")?;
            println!("{json}");
        }
        "summary" => println!("{}", render_summary(&project)),
        _ => {
            let yaml = project
                .to_yaml()
                .context("failed to serialize update config")?;
            println!("{yaml}");
        }
    }

    Ok(())
}

fn run_frameworks() {
    for eco in ALL_ECOSYSTEMS {
        println!("{}", eco.display_name());
        for signature in signatures::table(eco) {
            let patterns: usize = signature
                .categories
                .iter()
                .map(|c| c.patterns.len())
                .sum();
            println!("  {} ({} patterns)", signature.name, patterns);
        }
        println!();
    }
}
