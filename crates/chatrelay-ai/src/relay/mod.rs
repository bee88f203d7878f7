//! Relay module - session-keyed chat proxy
//!
//! Combines the rolling per-session history, the rate-limit cooldown, the
//! minimum latency floor and the `#CMD#` escape into [`ChatRelay::ask`].

mod chat;
pub mod command;
mod config;
pub mod conversation;
pub mod pacing;
pub mod replies;

pub use chat::{Answer, ChatRelay};
pub use command::CommandParse;
pub use config::{DEFAULT_MINIMAL_LATENCY_SECS, DEFAULT_TEMPERATURE, RelayConfig};
pub use conversation::{ConversationStore, HISTORY_LIMIT, TIME_MARKER};
