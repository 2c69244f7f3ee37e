// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `bom`: interactive bill-of-materials console.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bom_app_core::config::ConfigService;
use bom_cli::settings::load_prefs;
use bom_cli::{run, ReplOptions, Session};
use bom_config_fs::FsConfigStore;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Edit and query bill-of-materials graphs")]
struct Args {
    /// Read commands from this file instead of stdin
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,
    /// Echo every command before its output
    #[arg(long)]
    echo: bool,
    /// Tracing filter directive (overrides prefs; `RUST_LOG` wins over both)
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
    /// Directory holding `cli.json` (defaults to the platform config dir)
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,
    /// Ignore stored preferences and do not write any
    #[arg(long, conflicts_with = "config_dir")]
    no_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Config (best-effort)
    let store = match (&args.config_dir, args.no_config) {
        (_, true) => None,
        (Some(dir), false) => FsConfigStore::with_base(dir).ok(),
        (None, false) => FsConfigStore::new().ok(),
    };
    let config = store.map(ConfigService::new);
    let prefs = load_prefs(config.as_ref());

    let directive = args.log.as_deref().unwrap_or(&prefs.log_filter);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .with_context(|| format!("invalid log filter {directive:?}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    debug!(?prefs, "preferences loaded");

    let mut options = ReplOptions::from(&prefs);
    options.echo_commands |= args.echo;

    let mut session = Session::new();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let summary = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("open script {}", path.display()))?;
            info!(script = %path.display(), "running script");
            run(
                &mut session,
                BufReader::new(file),
                &mut stdout.lock(),
                &mut stderr.lock(),
                &options,
            )?
        }
        None => run(
            &mut session,
            io::stdin().lock(),
            &mut stdout.lock(),
            &mut stderr.lock(),
            &options,
        )?,
    };
    debug!(?summary, "exiting");
    Ok(())
}
