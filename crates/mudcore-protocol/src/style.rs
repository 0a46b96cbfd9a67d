//! Semantic color tokens and terminal styling.
//!
//! The visibility engine tags each rendered line with a [`ColorToken`]
//! describing what KIND of line it is, not which escape codes to emit.
//! The [`Styler`] turns token + text into the final wire string, so
//! tests and non-ANSI clients can run with styling off.

use serde::{Deserialize, Serialize};

/// Semantic color for a rendered line.
///
/// The assignments follow MUD convention: speech yellow, private
/// messages green, actions magenta, shouts loud (bold cyan), lifecycle
/// announcements bold red, room traffic cyan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorToken {
    /// Say.
    Speech,
    /// Tell.
    Private,
    /// Emote.
    Action,
    /// Shout.
    Loud,
    /// Join / Quit.
    Lifecycle,
    /// EnterRoom / LeaveRoom.
    Movement,
    /// Who replies and other direct informational lines.
    Info,
}

impl ColorToken {
    /// SGR parameter string for this token (e.g. `"1;36"` = bold cyan).
    fn sgr(self) -> &'static str {
        match self {
            Self::Speech => "33",
            Self::Private => "32",
            Self::Action => "35",
            Self::Loud => "1;36",
            Self::Lifecycle => "1;31",
            Self::Movement => "36",
            Self::Info => "37",
        }
    }
}

/// How rendered lines are decorated before hitting the socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Styler {
    /// Wrap each line in ANSI color escapes chosen by its token.
    #[default]
    Ansi,
    /// Pass text through untouched. Used by tests and dumb clients.
    Plain,
}

impl Styler {
    /// Applies this styler to one rendered line.
    pub fn apply(self, token: ColorToken, text: &str) -> String {
        match self {
            Self::Ansi => format!("\x1b[{}m{}\x1b[0m", token.sgr(), text),
            Self::Plain => text.to_string(),
        }
    }
}
