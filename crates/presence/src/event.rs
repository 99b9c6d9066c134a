//! Wire events and the state they fold into.
//!
//! One JSON object per line, tagged by `type`:
//!
//! ```text
//! {"type":"connect"}
//! {"type":"disconnect"}
//! {"type":"notification","data":"alice joined"}
//! {"type":"users","data":["alice","bob"]}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::PresenceError;

/// Oldest notifications are dropped past this many.
pub const MAX_NOTIFICATIONS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum PresenceEvent {
    Connect,
    Disconnect,
    Notification(String),
    Users(Vec<String>),
}

impl PresenceEvent {
    pub fn parse(line: &str) -> Result<Self, PresenceError> {
        Ok(serde_json::from_str(line.trim())?)
    }

    pub fn to_line(&self) -> Result<String, PresenceError> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// What the surrounding application shows about other players.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceState {
    pub connected: bool,
    pub notifications: Vec<String>,
    pub users: Vec<String>,
}

impl PresenceState {
    /// Notifications append; a roster replaces the previous one.
    pub fn apply(&mut self, event: PresenceEvent) {
        match event {
            PresenceEvent::Connect => self.connected = true,
            PresenceEvent::Disconnect => self.connected = false,
            PresenceEvent::Notification(text) => {
                if self.notifications.len() >= MAX_NOTIFICATIONS {
                    self.notifications.remove(0);
                }
                self.notifications.push(text);
            }
            PresenceEvent::Users(users) => self.users = users,
        }
    }

    pub fn last_notification(&self) -> Option<&str> {
        self.notifications.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_lines() {
        assert_eq!(
            PresenceEvent::parse(r#"{"type":"connect"}"#).unwrap(),
            PresenceEvent::Connect
        );
        assert_eq!(
            PresenceEvent::parse(r#"{"type":"users","data":["a","b"]}"#).unwrap(),
            PresenceEvent::Users(vec!["a".into(), "b".into()])
        );
        assert!(PresenceEvent::parse(r#"{"type":"shout"}"#).is_err());
        assert!(PresenceEvent::parse("not json").is_err());
    }

    #[test]
    fn notification_line_has_data_field() {
        let line = PresenceEvent::Notification("hi".into()).to_line().unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["type"], "notification");
        assert_eq!(value["data"], "hi");
    }

    #[test]
    fn state_folds_events() {
        let mut state = PresenceState::default();
        state.apply(PresenceEvent::Connect);
        state.apply(PresenceEvent::Users(vec!["a".into()]));
        state.apply(PresenceEvent::Users(vec!["b".into(), "c".into()]));
        state.apply(PresenceEvent::Notification("one".into()));
        state.apply(PresenceEvent::Notification("two".into()));

        assert!(state.connected);
        assert_eq!(state.users, vec!["b".to_string(), "c".to_string()]);
        assert_eq!(state.notifications.len(), 2);
        assert_eq!(state.last_notification(), Some("two"));

        state.apply(PresenceEvent::Disconnect);
        assert!(!state.connected);
    }

    #[test]
    fn notifications_are_capped() {
        let mut state = PresenceState::default();
        for i in 0..MAX_NOTIFICATIONS + 5 {
            state.apply(PresenceEvent::Notification(i.to_string()));
        }
        assert_eq!(state.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(state.notifications[0], "5");
    }
}
