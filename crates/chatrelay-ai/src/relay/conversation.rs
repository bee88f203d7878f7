//! Per-session rolling conversation history.
//!
//! Every session starts with two system messages: the configured prompt and
//! a "current time" marker that is rewritten on each recorded message. The
//! history is capped; once it grows past the cap the oldest conversational
//! entry (the first one after the two system slots) is dropped.

use std::collections::HashMap;

use chrono::{DateTime, Local};

use crate::llm::{Message, Role};

/// Maximum number of messages kept per session, system slots included.
pub const HISTORY_LIMIT: usize = 10;

/// Prefix of the synthetic time message.
pub const TIME_MARKER: &str = "当需要回答时间时请直接参考回复:";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FIRST_TURN_SLOT: usize = 2;

/// Session-keyed message histories.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    system_prompt: Message,
    sessions: HashMap<String, Vec<Message>>,
}

impl ConversationStore {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: Message::system(system_prompt),
            sessions: HashMap::new(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt.content
    }

    /// Append a message to a session, stamping the time marker with the local clock.
    pub fn record(&mut self, session_id: &str, text: impl Into<String>, role: Role) {
        self.record_at(session_id, text, role, Local::now());
    }

    pub fn record_at(
        &mut self,
        session_id: &str,
        text: impl Into<String>,
        role: Role,
        now: DateTime<Local>,
    ) {
        let marker = time_marker(now);
        let prompt = &self.system_prompt;
        let history = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| vec![prompt.clone(), Message::system(marker.clone())]);

        history.push(Message::new(role, text));

        for message in history.iter_mut() {
            if message.role == Role::System && message.content.starts_with(TIME_MARKER) {
                message.content = marker.clone();
            }
        }

        if history.len() > HISTORY_LIMIT {
            tracing::debug!(session = session_id, "Evicting oldest conversation turn");
            history.remove(FIRST_TURN_SLOT);
        }
    }

    pub fn history(&self, session_id: &str) -> Option<&[Message]> {
        self.sessions.get(session_id).map(Vec::as_slice)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

fn time_marker(now: DateTime<Local>) -> String {
    format!("{TIME_MARKER}{}", now.format(TIME_FORMAT))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 1, hour, minute, 0)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn test_new_session_gets_system_slots() {
        let mut store = ConversationStore::new("be brief");
        store.record_at("wxid", "hello", Role::User, at(9, 0));

        assert_eq!(store.system_prompt(), "be brief");
        let history = store.history("wxid").unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0], Message::system("be brief"));
        assert_eq!(
            history[1],
            Message::system(format!("{TIME_MARKER}2024-03-01 09:00:00"))
        );
        assert_eq!(history[2], Message::user("hello"));
    }

    #[test]
    fn test_history_stabilizes_at_limit() {
        let mut store = ConversationStore::new("prompt");
        for i in 0..25 {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            store.record_at("wxid", format!("turn {i}"), role, at(10, i));

            let history = store.history("wxid").unwrap();
            assert!(history.len() <= HISTORY_LIMIT);
            assert_eq!(history[0].content, "prompt");
            assert!(history[1].content.starts_with(TIME_MARKER));
        }

        let history = store.history("wxid").unwrap();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[2].content, "turn 17");
        assert_eq!(history[HISTORY_LIMIT - 1].content, "turn 24");
    }

    #[test]
    fn test_time_marker_tracks_latest_turn() {
        let mut store = ConversationStore::new("prompt");
        store.record_at("wxid", "first", Role::User, at(8, 15));
        store.record_at("wxid", "reply", Role::Assistant, at(8, 16));
        store.record_at("wxid", "second", Role::User, at(11, 42));

        let history = store.history("wxid").unwrap();
        let markers: Vec<_> = history
            .iter()
            .filter(|m| m.content.starts_with(TIME_MARKER))
            .collect();
        assert_eq!(markers.len(), 1);
        assert_eq!(
            markers[0].content,
            format!("{TIME_MARKER}2024-03-01 11:42:00")
        );
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut store = ConversationStore::new("prompt");
        store.record("alice", "hi", Role::User);
        store.record("room@chatroom", "hello all", Role::User);
        store.record("alice", "again", Role::User);

        assert_eq!(store.session_count(), 2);
        assert_eq!(store.history("alice").unwrap().len(), 4);
        assert_eq!(store.history("room@chatroom").unwrap().len(), 3);
        assert!(store.history("bob").is_none());
    }
}
