use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "cluster",
    about = "Cluster deployment config inspection and planning",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Config file to read (default: ~/.cluster)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the configured nodes and settings
    Show {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Generate a balanced deployment list of COUNT nodes.
    ///
    /// Nodes with a larger reuse count (`user@host:count`) appear
    /// proportionally more often.
    Deploy {
        /// Number of deployment slots to fill
        count: usize,
        /// Request a single cycle (currently has no effect)
        #[arg(long)]
        no_repeat: bool,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Print the effective config in config-file syntax
    Dump,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cluster=info".parse()?)
        )
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Show { format } => commands::show::show(&config, &format),
        Commands::Deploy { count, no_repeat, format } => {
            commands::deploy::deploy(config, count, !no_repeat, &format)
        }
        Commands::Dump => {
            print!("{}", config.to_config_string());
            Ok(())
        }
    }
}
