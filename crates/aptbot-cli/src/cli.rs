use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "aptbot")]
#[command(about = "Threat-actor group lookup over an offline snapshot", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a snapshot from a workbook source (the offline step).
    Build(BuildArgs),
    /// Run one query against a snapshot.
    Query(QueryArgs),
    /// Read queries line by line from stdin.
    Chat(ChatArgs),
    /// Print the recognized command keywords.
    Commands,
    /// Print a snapshot's build manifest.
    Info(SnapshotArgs),
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Workbook JSON path; falls back to APTBOT_SOURCE.
    #[arg(long)]
    pub source: Option<PathBuf>,
    /// Output snapshot path; falls back to APTBOT_SNAPSHOT.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Command keyword: group, tool, target or ops.
    pub command: String,
    /// Free-text argument matched as a case-insensitive substring.
    pub argument: Vec<String>,
    /// Snapshot path; falls back to APTBOT_SNAPSHOT.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ChatArgs {
    /// Snapshot path; falls back to APTBOT_SNAPSHOT.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
    /// Workbook path enabling the `reload` chat command; falls back to
    /// APTBOT_SOURCE.
    #[arg(long)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Snapshot path; falls back to APTBOT_SNAPSHOT.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn build_parses_source_and_out_flags() {
        let cli = Cli::try_parse_from([
            "aptbot", "build", "--source", "apt.json", "--out", "snapshot.json",
        ])
        .expect("parse");
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.source.expect("source").to_str(), Some("apt.json"));
                assert_eq!(args.out.expect("out").to_str(), Some("snapshot.json"));
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn query_collects_multi_word_arguments() {
        let cli = Cli::try_parse_from(["aptbot", "query", "group", "APT", "2"]).expect("parse");
        match cli.command {
            Commands::Query(args) => {
                assert_eq!(args.command, "group");
                assert_eq!(args.argument, vec!["APT", "2"]);
                assert!(args.snapshot.is_none());
            }
            _ => panic!("expected query command"),
        }
    }

    #[test]
    fn query_accepts_a_snapshot_override() {
        let cli = Cli::try_parse_from([
            "aptbot", "query", "tool", "agent", "--snapshot", "snap.json",
        ])
        .expect("parse");
        match cli.command {
            Commands::Query(args) => {
                assert_eq!(args.snapshot.expect("snapshot").to_str(), Some("snap.json"));
            }
            _ => panic!("expected query command"),
        }
    }

    #[test]
    fn chat_and_info_parse_without_flags() {
        assert!(Cli::try_parse_from(["aptbot", "chat"]).is_ok());
        assert!(Cli::try_parse_from(["aptbot", "info"]).is_ok());
        assert!(Cli::try_parse_from(["aptbot", "commands"]).is_ok());
    }

    #[test]
    fn query_requires_a_command_keyword() {
        assert!(Cli::try_parse_from(["aptbot", "query"]).is_err());
    }
}
