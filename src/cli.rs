use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "kir")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract container images from Kubernetes manifests")]
#[command(long_about = "Reads Kubernetes workload manifests (Pod, Deployment, DaemonSet, ReplicaSet, StatefulSet, Job, CronJob and List) and prints every container and init container image, one per line, in manifest order.")]
pub struct Cli {
    /// Files, directories or glob patterns to read; `-` reads stdin
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Skip documents that fail to parse instead of failing the whole input
    #[arg(short, long)]
    pub tolerant: bool,

    /// Print images as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }

    /// Whether stdin was requested.
    pub fn reads_stdin(&self) -> bool {
        self.paths.iter().any(|p| p == "-")
    }
}
