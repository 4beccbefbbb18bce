//! One-shot formatting toggles.
//!
//! Toggling bold, italic or underline arms that style for the next inserted
//! text only. Any buffer change that the toggle did not cause disarms all of
//! them again.

use std::fmt;
use std::str::FromStr;

/// A formatting style that can be armed for the next insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    Bold,
    Italic,
    Underline,
}

impl StyleKind {
    fn markers(self) -> (&'static str, &'static str) {
        match self {
            StyleKind::Bold => ("**", "**"),
            StyleKind::Italic => ("*", "*"),
            StyleKind::Underline => ("<u>", "</u>"),
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StyleKind::Bold => "bold",
            StyleKind::Italic => "italic",
            StyleKind::Underline => "underline",
        };
        f.write_str(name)
    }
}

impl FromStr for StyleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "b" | "bold" => Ok(StyleKind::Bold),
            "i" | "italic" | "italics" => Ok(StyleKind::Italic),
            "u" | "underline" => Ok(StyleKind::Underline),
            other => Err(format!("unknown style '{}'", other)),
        }
    }
}

/// Styles armed for the next insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingStyles {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl PendingStyles {
    /// Flips `kind` and returns its new state.
    pub fn toggle(&mut self, kind: StyleKind) -> bool {
        let flag = self.flag_mut(kind);
        *flag = !*flag;
        *flag
    }

    pub fn is_armed(&self, kind: StyleKind) -> bool {
        match kind {
            StyleKind::Bold => self.bold,
            StyleKind::Italic => self.italic,
            StyleKind::Underline => self.underline,
        }
    }

    pub fn any(&self) -> bool {
        self.bold || self.italic || self.underline
    }

    pub fn reset(&mut self) {
        *self = PendingStyles::default();
    }

    /// Wraps the non-whitespace core of `text` in the markers of every armed
    /// style. Surrounding whitespace stays outside the markers so the result
    /// still reads as markdown emphasis.
    pub fn apply(&self, text: &str) -> String {
        let core = text.trim();
        if core.is_empty() || !self.any() {
            return text.to_string();
        }

        let start = text.len() - text.trim_start().len();
        let end = start + core.len();

        // Underline outermost so `<u>` never splits a `***` run.
        let mut styled = core.to_string();
        for kind in [StyleKind::Italic, StyleKind::Bold, StyleKind::Underline] {
            if self.is_armed(kind) {
                let (open, close) = kind.markers();
                styled = format!("{}{}{}", open, styled, close);
            }
        }

        format!("{}{}{}", &text[..start], styled, &text[end..])
    }

    fn flag_mut(&mut self, kind: StyleKind) -> &mut bool {
        match kind {
            StyleKind::Bold => &mut self.bold,
            StyleKind::Italic => &mut self.italic,
            StyleKind::Underline => &mut self.underline,
        }
    }
}
