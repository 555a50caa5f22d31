use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use convert_logging::LogDestination;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "convert.ron";
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Submit a file for conversion and wait for the results
pub struct Args {
    /// RON config file; ignored when missing
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: PathBuf,

    /// Job endpoint of the backend
    #[arg(long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Milliseconds between two status queries
    #[arg(long, value_name = "MS", global = true)]
    pub poll_interval_ms: Option<u64>,

    /// Give up polling after this many milliseconds
    #[arg(long, value_name = "MS", global = true)]
    pub max_poll_ms: Option<u64>,

    /// Where log output goes
    #[arg(long, value_enum, global = true)]
    pub log: Option<LogTarget>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a local file and convert it
    Upload {
        /// File to upload
        path: PathBuf,

        /// Content type declared for the upload
        #[arg(long, default_value = DEFAULT_CONTENT_TYPE)]
        content_type: String,
    },
    /// Convert a file that is already stored at a URL
    Reference {
        /// URL of the stored file
        source_url: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    #[default]
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}
