/*!
# Quill

Quill is a journal with one entry per calendar date. It keeps a text buffer bound
to the date being viewed, writes it back to a markdown file for that date, and
autosaves shortly after the typing stops.

## Core Features

- One `diary-YYYY-MM-DD.md` file per date; clearing an entry deletes its file
- Navigation to the previous day, the next day, today, or any date
- Debounced autosave: a burst of edits is saved once, a few ticks after it ends
- One-shot bold, italic and underline toggles for the next line typed

## Architecture

- `store`: date-keyed persistence (`DocumentStore`, `EntryStore`)
- `session`: editor state, date navigation and the autosave countdown
- `command`: the closed set of events a front end sends to a session
- `frontend`: the line-oriented terminal front end
- `cli`, `config`, `errors`, `constants`: ambient plumbing

## Usage Example

```rust,no_run
use quill::{Config, DocumentStore, EditorSession};
use quill::session::{Clock, SystemClock};

fn main() -> quill::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let store = DocumentStore::open(&config.journal_dir)?;
    let mut session = EditorSession::open(store, SystemClock.today(), config.autosave_ticks)?;

    session.insert_text("Started a journal.\n");
    session.quit()?;
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Commands a front end dispatches to a session
pub mod command;
/// Configuration loading and management
pub mod config;
/// Constants used throughout the application
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Terminal front end
pub mod frontend;
/// Editing session and autosave policy
pub mod session;
/// Date-keyed entry storage
pub mod store;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult, StorageError};
pub use session::EditorSession;
pub use store::{DocumentStore, EntryStore, SaveOutcome};
