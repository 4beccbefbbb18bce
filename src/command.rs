//! The closed set of events a front end can send to an editing session.

use crate::errors::StorageError;
use crate::session::{Clock, EditorSession, StyleKind};
use crate::store::{EntryStore, SaveOutcome};
use chrono::NaiveDate;

/// One front-end event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ChangeDate(NaiveDate),
    PreviousDate,
    NextDate,
    Today,
    Save,
    Quit,
    Tick,
    ToggleStyle(StyleKind),
    /// Append text to the buffer.
    Insert(String),
    /// Empty the buffer.
    Clear,
}

/// What a dispatched command did, for the front end to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing worth reporting happened.
    None,
    /// A navigation command ran; `changed` is false if the date was already showing.
    Navigated { changed: bool },
    /// An explicit save completed.
    Saved(SaveOutcome),
    /// A tick fired the autosave.
    Autosaved(SaveOutcome),
    StyleToggled { kind: StyleKind, armed: bool },
    /// The final save succeeded and the front end should stop.
    Exit(SaveOutcome),
}

/// Runs `command` against `session`.
///
/// Each command maps to exactly one session operation; errors from the store
/// are returned untouched so the caller can report them.
pub fn dispatch<S: EntryStore>(
    session: &mut EditorSession<S>,
    command: Command,
    clock: &impl Clock,
) -> Result<Effect, StorageError> {
    let effect = match command {
        Command::ChangeDate(date) => Effect::Navigated {
            changed: session.change_date(date)?,
        },
        Command::PreviousDate => Effect::Navigated {
            changed: session.previous_date()?,
        },
        Command::NextDate => Effect::Navigated {
            changed: session.next_date()?,
        },
        Command::Today => Effect::Navigated {
            changed: session.today(clock)?,
        },
        Command::Save => Effect::Saved(session.save()?),
        Command::Quit => Effect::Exit(session.quit()?),
        Command::Tick => session.tick()?.map_or(Effect::None, Effect::Autosaved),
        Command::ToggleStyle(kind) => Effect::StyleToggled {
            kind,
            armed: session.toggle_style(kind),
        },
        Command::Insert(text) => {
            session.insert_text(&text);
            Effect::None
        }
        Command::Clear => {
            session.clear();
            Effect::None
        }
    };
    Ok(effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::RecordingStore;
    use crate::session::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn run(
        session: &mut EditorSession<RecordingStore>,
        commands: Vec<Command>,
    ) -> Vec<Effect> {
        let clock = FixedClock(date(2024, 6, 1));
        commands
            .into_iter()
            .map(|command| dispatch(session, command, &clock).unwrap())
            .collect()
    }

    #[test]
    fn test_typing_then_ticking_autosaves_once() {
        let day = date(2024, 5, 1);
        let mut session = EditorSession::open(RecordingStore::default(), day, 5).unwrap();

        let mut commands = vec![Command::Insert("Hello".to_string())];
        commands.extend(std::iter::repeat(Command::Tick).take(7));
        let effects = run(&mut session, commands);

        let autosaves: Vec<_> = effects
            .iter()
            .filter(|e| matches!(e, Effect::Autosaved(_)))
            .collect();
        assert_eq!(autosaves, vec![&Effect::Autosaved(SaveOutcome::Written)]);
        assert_eq!(effects[5], Effect::Autosaved(SaveOutcome::Written));
    }

    #[test]
    fn test_navigation_effects() {
        let mut session =
            EditorSession::open(RecordingStore::default(), date(2024, 5, 1), 5).unwrap();

        let effects = run(
            &mut session,
            vec![
                Command::NextDate,
                Command::ChangeDate(date(2024, 5, 2)),
                Command::PreviousDate,
                Command::Today,
            ],
        );

        assert_eq!(
            effects,
            vec![
                Effect::Navigated { changed: true },
                Effect::Navigated { changed: false },
                Effect::Navigated { changed: true },
                Effect::Navigated { changed: true },
            ]
        );
        assert_eq!(session.current_date(), date(2024, 6, 1));
    }

    #[test]
    fn test_style_toggle_and_insert() {
        let mut session =
            EditorSession::open(RecordingStore::default(), date(2024, 5, 1), 5).unwrap();

        let effects = run(
            &mut session,
            vec![
                Command::ToggleStyle(StyleKind::Italic),
                Command::Insert("soft".to_string()),
            ],
        );

        assert_eq!(
            effects[0],
            Effect::StyleToggled {
                kind: StyleKind::Italic,
                armed: true
            }
        );
        assert_eq!(session.buffer(), "*soft*");
    }

    #[test]
    fn test_clear_then_quit_removes_entry() {
        let day = date(2024, 5, 1);
        let mut session =
            EditorSession::open(RecordingStore::with_entry(day, "gone soon"), day, 5).unwrap();

        let effects = run(&mut session, vec![Command::Clear, Command::Quit]);

        assert_eq!(effects[1], Effect::Exit(SaveOutcome::Removed));
        assert_eq!(session.store().entry(day), None);
    }

    #[test]
    fn test_failed_quit_reports_error() {
        let day = date(2024, 5, 1);
        let mut session = EditorSession::open(RecordingStore::default(), day, 5).unwrap();
        session.insert_text("unsaved");
        session.store().fail_saves.set(true);

        let result = dispatch(&mut session, Command::Quit, &FixedClock(day));

        assert!(matches!(result, Err(StorageError::Write { .. })));
        assert!(session.is_dirty());
    }
}
