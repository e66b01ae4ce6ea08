use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use note_activity_report::cli::{Cli, normalize};
use note_activity_report::{NoteStore, NoteTrackingReport, util, window};

fn init_tracing(quiet: bool) {
  // --quiet overrides RUST_LOG
  let filter = if quiet {
    EnvFilter::new("warn")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("note_activity_report=info"))
  };

  tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  init_tracing(cli.quiet);

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: resolve now and the window
  let now = window::effective_now(window::parse_now_override(cfg.now_override.as_deref()));
  let since = cfg.since_duration(now)?;
  let report = NoteTrackingReport::new(since, now);

  // Phase 3: query, pivot, render, write
  let store = NoteStore::open_existing(std::path::Path::new(&cfg.db))?;
  let text = report.render(&store, cfg.format)?;
  util::write_output(&cfg.out, &text)
}
