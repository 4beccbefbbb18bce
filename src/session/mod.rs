//! The editing session: which date is showing, what is in the buffer, and when
//! the buffer gets written back.
//!
//! `EditorSession` owns all mutable editor state as plain fields. A front end
//! drives it one event at a time (edits, ticks, date changes, quit); the
//! session talks to an [`EntryStore`] and never calls back into the front end.
//!
//! # Autosave
//!
//! Every modification arms a countdown of `autosave_ticks` ticks. Each tick
//! decrements it, and the tick that finds it at 1 saves the buffer. Typing
//! keeps re-arming the countdown, so a burst of edits produces a single save
//! once the user pauses.
//!
//! # Examples
//!
//! ```
//! use quill::session::EditorSession;
//! use quill::store::{DocumentStore, EntryStore};
//! use chrono::NaiveDate;
//! # let dir = tempfile::tempdir().unwrap();
//! let store = DocumentStore::open(dir.path()).unwrap();
//! let may_first = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let mut session = EditorSession::open(store, may_first, 5).unwrap();
//!
//! session.set_text("Hello");
//! for _ in 0..5 {
//!     session.tick().unwrap();
//! }
//!
//! assert_eq!(session.store().load(may_first).unwrap(), "Hello");
//! ```

pub mod clock;
pub mod style;

use crate::constants::DATE_LABEL_FORMAT;
use crate::errors::StorageError;
use crate::store::{EntryStore, SaveOutcome};
use chrono::{Days, NaiveDate};
use tracing::{debug, info};

pub use clock::{Clock, FixedClock, SystemClock};
pub use style::{PendingStyles, StyleKind};

/// Who caused a buffer modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// Typing, pasting, clearing: anything the user did to the text itself.
    User,
    /// Re-formatting applied by a style toggle. Keeps the armed styles.
    StyleToggle,
}

/// Editor state bound to a single date at a time.
#[derive(Debug)]
pub struct EditorSession<S: EntryStore> {
    store: S,
    current_date: NaiveDate,
    buffer: String,
    dirty_countdown: u32,
    autosave_ticks: u32,
    pending_styles: PendingStyles,
}

impl<S: EntryStore> EditorSession<S> {
    /// Starts a session on `date` with that date's stored content loaded.
    ///
    /// `autosave_ticks` is the debounce window; values below 1 are treated as 1.
    pub fn open(store: S, date: NaiveDate, autosave_ticks: u32) -> Result<Self, StorageError> {
        let buffer = store.load(date)?;
        info!("Session opened on {}", date);

        Ok(EditorSession {
            store,
            current_date: date,
            buffer,
            dirty_countdown: 0,
            autosave_ticks: autosave_ticks.max(1),
            pending_styles: PendingStyles::default(),
        })
    }

    /// The store entries are loaded from and saved to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The date whose entry is being edited.
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    /// The unsaved text of the current entry.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Ticks left before an autosave; 0 when the buffer is clean.
    pub fn dirty_countdown(&self) -> u32 {
        self.dirty_countdown
    }

    /// Whether the buffer has changes that are not saved yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty_countdown > 0
    }

    /// Idle ticks between the last modification and its autosave.
    pub fn autosave_ticks(&self) -> u32 {
        self.autosave_ticks
    }

    /// Styles armed for the next insert.
    pub fn pending_styles(&self) -> PendingStyles {
        self.pending_styles
    }

    /// Heading for the current date, e.g. "Wednesday 01, May 2024".
    pub fn date_label(&self) -> String {
        self.current_date.format(DATE_LABEL_FORMAT).to_string()
    }

    /// Replaces the whole buffer.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.push_str(text);
        self.note_modified(ChangeOrigin::User);
    }

    /// Appends `text`, formatted with whatever styles are armed. The armed
    /// styles are consumed by this insert.
    pub fn insert_text(&mut self, text: &str) {
        let styled = self.pending_styles.apply(text);
        self.buffer.push_str(&styled);
        self.note_modified(ChangeOrigin::User);
    }

    /// Empties the buffer. The entry is removed from disk on the next save.
    pub fn clear(&mut self) {
        self.set_text("");
    }

    /// Records that the buffer changed: re-arms the autosave countdown and,
    /// unless a style toggle caused the change, disarms pending styles.
    pub fn note_modified(&mut self, origin: ChangeOrigin) {
        self.dirty_countdown = self.autosave_ticks;
        if origin == ChangeOrigin::User {
            self.pending_styles.reset();
        }
    }

    /// Arms or disarms `kind` for the next insert and returns its new state.
    pub fn toggle_style(&mut self, kind: StyleKind) -> bool {
        let armed = self.pending_styles.toggle(kind);
        debug!("{} {}", kind, if armed { "armed" } else { "disarmed" });
        armed
    }

    /// Advances the autosave countdown by one tick.
    ///
    /// Returns the outcome when this tick performed a save. If that save fails
    /// the countdown stays at 1, so the buffer remains dirty and the next tick
    /// tries again.
    pub fn tick(&mut self) -> Result<Option<SaveOutcome>, StorageError> {
        match self.dirty_countdown {
            0 => Ok(None),
            1 => {
                debug!("Autosaving {}", self.current_date);
                let outcome = self.store.save(self.current_date, &self.buffer)?;
                self.dirty_countdown = 0;
                Ok(Some(outcome))
            }
            _ => {
                self.dirty_countdown -= 1;
                Ok(None)
            }
        }
    }

    /// Saves the buffer immediately, whatever the countdown says.
    pub fn save(&mut self) -> Result<SaveOutcome, StorageError> {
        let outcome = self.store.save(self.current_date, &self.buffer)?;
        self.dirty_countdown = 0;
        Ok(outcome)
    }

    /// Final flush before the process exits.
    pub fn quit(&mut self) -> Result<SaveOutcome, StorageError> {
        let outcome = self.save()?;
        info!("Session closed on {}", self.current_date);
        Ok(outcome)
    }

    /// Moves the session to `new_date`.
    ///
    /// The buffer is saved to the old date before the new date's content is
    /// loaded, so the buffer never mixes two dates. Returns `false` without
    /// touching the store when `new_date` is already showing.
    ///
    /// # Errors
    ///
    /// If saving the old entry or loading the new one fails, the session stays
    /// on the old date with its buffer untouched.
    pub fn change_date(&mut self, new_date: NaiveDate) -> Result<bool, StorageError> {
        if new_date == self.current_date {
            return Ok(false);
        }

        info!("Changing date {} -> {}", self.current_date, new_date);
        self.store.save(self.current_date, &self.buffer)?;
        let loaded = self.store.load(new_date)?;

        self.buffer.clear();
        self.current_date = new_date;
        self.buffer = loaded;
        self.dirty_countdown = 0;
        self.pending_styles.reset();
        Ok(true)
    }

    pub fn previous_date(&mut self) -> Result<bool, StorageError> {
        match self.current_date.checked_sub_days(Days::new(1)) {
            Some(date) => self.change_date(date),
            None => Ok(false),
        }
    }

    pub fn next_date(&mut self) -> Result<bool, StorageError> {
        match self.current_date.checked_add_days(Days::new(1)) {
            Some(date) => self.change_date(date),
            None => Ok(false),
        }
    }

    pub fn today(&mut self, clock: &impl Clock) -> Result<bool, StorageError> {
        self.change_date(clock.today())
    }
}
