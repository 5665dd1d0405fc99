use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use aptbot_core::config::AppConfig;
use aptbot_core::snapshot::{Snapshot, SnapshotStore};
use aptbot_core::{dispatch, respond};
use tracing::warn;

use crate::cli::{BuildArgs, ChatArgs, Commands, QueryArgs, SnapshotArgs};

pub(crate) fn run(command: Commands) -> Result<()> {
    let config = AppConfig::from_env();
    match command {
        Commands::Build(args) => build(&config, args),
        Commands::Query(args) => query(&config, args),
        Commands::Chat(args) => chat(&config, args),
        Commands::Commands => {
            println!("{}", respond::help_response());
            Ok(())
        }
        Commands::Info(args) => info(&config, args),
    }
}

fn build(config: &AppConfig, args: BuildArgs) -> Result<()> {
    let source = resolve_path(
        args.source,
        config.source_path.clone(),
        "--source or APTBOT_SOURCE",
    )?;
    let out = resolve_path(
        args.out,
        config.snapshot_path.clone(),
        "--out or APTBOT_SNAPSHOT",
    )?;

    let snapshot = Snapshot::build_from_path(&source)
        .with_context(|| format!("failed to build snapshot from {}", source.display()))?;
    snapshot
        .save(&out)
        .with_context(|| format!("failed to save snapshot to {}", out.display()))?;

    print_json(&serde_json::json!({
        "status": "ok",
        "snapshot": out,
        "snapshot_id": snapshot.manifest.snapshot_id,
        "records": snapshot.manifest.record_count,
    }))
}

fn query(config: &AppConfig, args: QueryArgs) -> Result<()> {
    let snapshot = load_snapshot(config, args.snapshot)?;
    let text = format!("{} {}", args.command, args.argument.join(" "));
    println!("{}", dispatch::handle_text(&snapshot, &text));
    Ok(())
}

fn chat(config: &AppConfig, args: ChatArgs) -> Result<()> {
    let snapshot = load_snapshot(config, args.snapshot)?;
    let source = args.source.or_else(|| config.source_path.clone());
    let store = SnapshotStore::new(snapshot);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }
        if line == "reload" {
            reload(&store, source.as_deref(), &mut stdout)?;
            continue;
        }
        writeln!(stdout, "{}", dispatch::handle_text(&store.current(), line))?;
    }
    Ok(())
}

/// Rebuilds off to the side and swaps the new snapshot in whole; the live
/// snapshot is untouched when the rebuild fails.
fn reload(store: &SnapshotStore, source: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let Some(source) = source else {
        writeln!(out, "reload unavailable: no source configured")?;
        return Ok(());
    };
    match Snapshot::build_from_path(source) {
        Ok(snapshot) => {
            writeln!(out, "snapshot reloaded ({} records)", snapshot.manifest.record_count)?;
            store.publish(snapshot);
        }
        Err(err) => {
            warn!(error = %err, "reload failed; keeping current snapshot");
            writeln!(out, "reload failed: {err}")?;
        }
    }
    Ok(())
}

fn info(config: &AppConfig, args: SnapshotArgs) -> Result<()> {
    let snapshot = load_snapshot(config, args.snapshot)?;
    print_json(&snapshot.manifest)
}

fn load_snapshot(config: &AppConfig, flag: Option<PathBuf>) -> Result<Snapshot> {
    let path = resolve_path(
        flag,
        config.snapshot_path.clone(),
        "--snapshot or APTBOT_SNAPSHOT",
    )?;
    Snapshot::load(&path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))
}

fn resolve_path(flag: Option<PathBuf>, fallback: Option<PathBuf>, what: &str) -> Result<PathBuf> {
    if let Some(path) = flag.or(fallback) {
        return Ok(path);
    }
    bail!("missing path: set {what}");
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
