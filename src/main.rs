/*!
# Quill - A Date-Keyed Journal

Quill opens the journal entry for today (or `--date`) in a line-oriented editor.
Typed lines are appended to the entry; `:help` lists the commands for moving
between dates, formatting and saving. Edits are saved automatically a few
seconds after typing stops, whenever the date changes, and on exit.

## Usage

```
quill [OPTIONS]

Options:
  -d, --date <DATE>              Opens the entry for a specific date (format: YYYY-MM-DD or YYYYMMDD)
  -v, --verbose                  Print verbose output
      --log-format <LOG_FORMAT>  Format of log lines written to stderr [default: text] [possible values: text, json]
  -h, --help                     Print help
  -V, --version                  Print version
```

## Configuration

- `QUILL_DIR`: The directory entries are stored in (defaults to "~/Documents/diary")
- `QUILL_AUTOSAVE_TICKS`: Idle ticks before an edit is saved (defaults to 5)
- `QUILL_TICK_MS`: Length of a tick in milliseconds (defaults to 1000)
*/

use clap::Parser;
use quill::cli::{CliArgs, LogFormat};
use quill::config::Config;
use quill::constants::{
    DEFAULT_LOG_LEVEL, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME, VERBOSE_LOG_LEVEL,
};
use quill::errors::{AppError, AppResult};
use quill::frontend;
use quill::session::{Clock, EditorSession, SystemClock};
use quill::store::DocumentStore;
use std::io::{self, BufReader};
use std::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> AppResult<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose, args.log_format);

    let root_span = tracing::info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %uuid::Uuid::new_v4()
    );
    let _guard = root_span.enter();

    info!("Starting quill");
    debug!("CLI arguments: {:?}", args);

    let config = Config::load()?;
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let clock = SystemClock;
    let start_date = match args.parse_date() {
        Some(parsed) => {
            parsed.map_err(|e| AppError::Input(format!("Invalid date format: {}", e)))?
        }
        None => clock.today(),
    };

    let store = DocumentStore::open(&config.journal_dir)?;
    let mut session = EditorSession::open(store, start_date, config.autosave_ticks)?;

    let (events_tx, events_rx) = mpsc::channel();
    frontend::spawn_reader(BufReader::new(io::stdin()), events_tx.clone());
    frontend::spawn_ticker(config.tick_interval, events_tx);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    frontend::run(&mut session, events_rx, &clock, &mut out)?;

    info!("Exiting quill");
    Ok(())
}

fn init_tracing(verbose: bool, format: LogFormat) {
    let default_level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
