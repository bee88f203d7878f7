//! In-band `#CMD#<name>#<param>#` commands.

use once_cell::sync::Lazy;
use regex::Regex;

/// Literal that flags a question as a command attempt.
pub const COMMAND_MARKER: &str = "#CMD#";

/// Command name that adjusts the minimum reply latency.
pub const SET_DELAY: &str = "设置时延";

/// Upper bound for the minimum reply latency, in seconds.
pub const MAX_MINIMAL_LATENCY_SECS: u64 = 60;

static COMMAND_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#CMD#([^#]+)#([^#]*)#").expect("valid command pattern"));

/// Result of scanning a question for a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParse {
    /// No command marker in the text.
    NotCommand,
    /// Marker present but the text does not form a usable command.
    Malformed,
    /// Set the minimum latency; the value is already clamped.
    SetDelay(u64),
    /// Well-formed command with a name nothing handles.
    Unknown { name: String, param: String },
}

impl CommandParse {
    pub fn parse(text: &str) -> Self {
        if !text.contains(COMMAND_MARKER) {
            return CommandParse::NotCommand;
        }

        let Some(captures) = COMMAND_PATTERN.captures(text) else {
            return CommandParse::Malformed;
        };
        let name = captures[1].trim();
        let param = captures[2].trim();

        match name {
            SET_DELAY => match param.parse::<u64>() {
                Ok(secs) => CommandParse::SetDelay(clamp_latency(secs)),
                Err(_) => CommandParse::Malformed,
            },
            _ => CommandParse::Unknown {
                name: name.to_string(),
                param: param.to_string(),
            },
        }
    }
}

pub fn clamp_latency(secs: u64) -> u64 {
    secs.min(MAX_MINIMAL_LATENCY_SECS)
}
