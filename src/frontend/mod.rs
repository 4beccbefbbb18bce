//! Line-oriented terminal front end.
//!
//! Lines of text are appended to the entry; lines starting with `:` are
//! commands. Input and the autosave timer run on helper threads that only
//! forward [`Event`]s over a channel. Every session operation happens on the
//! thread calling [`run`], one event at a time.

use crate::cli::parse_date;
use crate::command::{dispatch, Command, Effect};
use crate::constants::COMMAND_PREFIX;
use crate::errors::{AppError, AppResult};
use crate::session::{Clock, EditorSession, StyleKind};
use crate::store::{EntryStore, SaveOutcome};
use std::borrow::Cow;
use std::io::{self, BufRead, ErrorKind, Write};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, warn};

const HELP: &str = "\
Type to append text to the entry. Commands:
  :prev, :next, :today     move one day back, one day forward, or to today
  :date YYYY-MM-DD         jump to a date
  :bold, :italic, :underline
                           format the next line you type
  :show                    print the entry
  :clear                   empty the entry (it is deleted on save)
  :save                    save now
  :quit                    save and exit
  ::text                   append a line starting with ':'";

/// Something that happened outside the session.
#[derive(Debug)]
pub enum Event {
    Line(String),
    Tick,
    /// Input was closed.
    Eof,
    ReadFailed(io::Error),
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Show,
    Help,
}

/// Turns one line of input into a command.
///
/// # Errors
///
/// Returns `AppError::Input` for unknown commands, missing or malformed dates.
pub fn parse_line(line: &str) -> AppResult<Input> {
    let Some(rest) = line.strip_prefix(COMMAND_PREFIX) else {
        return Ok(Input::Command(Command::Insert(format!("{}\n", line))));
    };

    if rest.starts_with(COMMAND_PREFIX) {
        return Ok(Input::Command(Command::Insert(format!("{}\n", rest))));
    }

    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or("");
    let argument = words.next();

    let command = match name {
        "prev" | "yesterday" => Command::PreviousDate,
        "next" | "tomorrow" => Command::NextDate,
        "today" => Command::Today,
        "date" => {
            let raw = argument
                .ok_or_else(|| AppError::Input("':date' needs a date".to_string()))?;
            let date = parse_date(raw)
                .map_err(|e| AppError::Input(format!("Invalid date format '{}': {}", raw, e)))?;
            Command::ChangeDate(date)
        }
        "save" | "w" => Command::Save,
        "quit" | "q" => Command::Quit,
        "clear" => Command::Clear,
        "show" => return Ok(Input::Show),
        "help" | "h" => return Ok(Input::Help),
        other => match other.parse::<StyleKind>() {
            Ok(kind) => Command::ToggleStyle(kind),
            Err(_) => {
                return Err(AppError::Input(format!(
                    "Unknown command ':{}'. Type :help for a list",
                    other
                )))
            }
        },
    };

    Ok(Input::Command(command))
}

/// Forwards every line of `input` as an [`Event::Line`], then [`Event::Eof`].
///
/// Bytes that are not valid UTF-8 are replaced rather than ending the input;
/// only a failing read does that.
pub fn spawn_reader<R>(mut input: R, events: Sender<Event>) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        let mut raw = Vec::new();
        loop {
            raw.clear();
            let event = match input.read_until(b'\n', &mut raw) {
                Ok(0) => Event::Eof,
                Ok(_) => Event::Line(decode_line(&raw)),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => Event::ReadFailed(e),
            };
            let last = matches!(event, Event::Eof | Event::ReadFailed(_));
            if events.send(event).is_err() || last {
                return;
            }
        }
    })
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    let line = String::from_utf8_lossy(raw);
    if let Cow::Owned(_) = line {
        warn!("Replaced invalid UTF-8 in input line");
    }
    line.into_owned()
}

/// Sends an [`Event::Tick`] every `interval` until the receiver goes away.
pub fn spawn_ticker(interval: Duration, events: Sender<Event>) -> JoinHandle<()> {
    thread::spawn(move || loop {
        thread::sleep(interval);
        if events.send(Event::Tick).is_err() {
            return;
        }
    })
}

/// Drives `session` from `events` until the user quits or input ends.
///
/// Storage failures while editing are reported to `out` and the session keeps
/// going, so the user can retry. When input ends the final save must succeed;
/// its failure is returned.
pub fn run<S, C, W>(
    session: &mut EditorSession<S>,
    events: Receiver<Event>,
    clock: &C,
    out: &mut W,
) -> AppResult<()>
where
    S: EntryStore,
    C: Clock,
    W: Write,
{
    print_entry(session, out)?;

    for event in events.iter() {
        let command = match event {
            Event::Tick => Command::Tick,
            Event::Line(line) => match parse_line(&line) {
                Ok(Input::Command(command)) => command,
                Ok(Input::Show) => {
                    print_entry(session, out)?;
                    continue;
                }
                Ok(Input::Help) => {
                    writeln!(out, "{}", HELP)?;
                    continue;
                }
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    continue;
                }
            },
            Event::ReadFailed(e) => {
                error!("Failed to read input: {}", e);
                writeln!(out, "Input error: {}", e)?;
                return finish(session, clock, out);
            }
            Event::Eof => return finish(session, clock, out),
        };

        match dispatch(session, command, clock) {
            Ok(Effect::Exit(_)) => return Ok(()),
            Ok(effect) => report(session, effect, out)?,
            Err(e) => {
                warn!("{}", e);
                writeln!(out, "Could not save or load: {}", e)?;
            }
        }
    }

    // Every sender hung up without an explicit end of input.
    finish(session, clock, out)
}

fn finish<S, C, W>(session: &mut EditorSession<S>, clock: &C, out: &mut W) -> AppResult<()>
where
    S: EntryStore,
    C: Clock,
    W: Write,
{
    debug!("Input closed, saving before exit");
    match dispatch(session, Command::Quit, clock) {
        Ok(_) => Ok(()),
        Err(e) => {
            writeln!(out, "Could not save before exiting: {}", e)?;
            Err(e.into())
        }
    }
}

fn report<S: EntryStore, W: Write>(
    session: &EditorSession<S>,
    effect: Effect,
    out: &mut W,
) -> io::Result<()> {
    match effect {
        Effect::Navigated { changed: true } => print_entry(session, out),
        Effect::Saved(outcome) => writeln!(out, "{}", describe(outcome)),
        Effect::StyleToggled { kind, armed } => {
            writeln!(out, "{} {}", kind, if armed { "on" } else { "off" })
        }
        Effect::Navigated { changed: false }
        | Effect::Autosaved(_)
        | Effect::None
        | Effect::Exit(_) => Ok(()),
    }
}

fn describe(outcome: SaveOutcome) -> &'static str {
    match outcome {
        SaveOutcome::Written => "Saved.",
        SaveOutcome::Removed => "Entry was empty and has been removed.",
        SaveOutcome::Skipped => "Nothing to save.",
    }
}

fn print_entry<S: EntryStore, W: Write>(
    session: &EditorSession<S>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "== {} ==", session.date_label())?;
    let buffer = session.buffer();
    if !buffer.is_empty() {
        write!(out, "{}", buffer)?;
        if !buffer.ends_with('\n') {
            writeln!(out)?;
        }
    }
    out.flush()
}
