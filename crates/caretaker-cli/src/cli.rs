use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "caretaker")]
#[command(about = "Watch and acknowledge wearable emergency alerts from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Gateway base URL (overrides CARETAKER_GATEWAY_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub gateway_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Follow the alert feed, raising new alerts and accepting acknowledgements on stdin
    Watch {
        /// Do not ring the terminal bell when an alert is raised
        #[arg(long)]
        no_bell: bool,
    },
    /// Show active alerts
    List {
        /// Show every alert, acknowledged or not
        #[arg(long)]
        history: bool,
        /// Maximum number of alerts to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Acknowledge an alert
    Ack {
        /// Alert id
        id: String,
    },
    /// Report an alert to the gateway, as a wearable would
    Send {
        /// Alert type token, e.g. FALL_DETECTED
        #[arg(value_name = "TYPE")]
        alert_type: String,
        /// Reporting device id (gateway default when omitted)
        #[arg(long, value_name = "ID")]
        device_id: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
