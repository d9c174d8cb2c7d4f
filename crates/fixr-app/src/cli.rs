use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fixr_ai::{ServiceCategory, Urgency};

/// Fixr: describe or photograph a household problem and get an AI diagnosis.
#[derive(Parser, Debug)]
#[command(name = "fixr", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chat with the assistant. `/image PATH` uploads a photo, `/quit` exits.
    Chat,

    /// Diagnose a single photo.
    Analyze {
        /// Image file to upload.
        image: PathBuf,
    },

    /// File a problem report, with optional photo analysis.
    Submit {
        #[arg(long)]
        description: String,
        /// plumbing, electrical, hvac, appliance, handyman, other
        #[arg(long)]
        category: ServiceCategory,
        /// low, medium, high
        #[arg(long, default_value = "medium")]
        urgency: Urgency,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Create an account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign in.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out and forget stored credentials.
    Logout,

    /// Show the signed-in user.
    Whoami,

    /// Print the resolved configuration as JSON.
    Config,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_submit() {
        let args = Args::try_parse_from([
            "fixr",
            "submit",
            "--description",
            "Breaker keeps tripping",
            "--category",
            "electrical",
            "--urgency",
            "high",
        ])
        .unwrap();
        match args.command {
            Command::Submit {
                category, urgency, location, image, ..
            } => {
                assert_eq!(category, ServiceCategory::Electrical);
                assert_eq!(urgency, Urgency::High);
                assert_eq!(location, "");
                assert!(image.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_category() {
        let result = Args::try_parse_from([
            "fixr",
            "submit",
            "--description",
            "x",
            "--category",
            "roofing",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::try_parse_from(["fixr", "chat", "--log-level", "debug"]).unwrap();
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(matches!(args.command, Command::Chat));
    }
}
