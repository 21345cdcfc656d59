//! # Catalog Models
//!
//! The activity record shared by the store, the seeder and the HTTP layer.

use serde::{Deserialize, Serialize};

/// An extracurricular activity and its current participants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    /// Unique activity name (primary key)
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Human-readable schedule, never parsed
    pub schedule: String,
    /// Advisory capacity. Signups are not limited by it.
    pub max_participants: u32,
    /// Participant emails in signup order
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: Vec::new(),
        }
    }

    pub fn with_participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = participants.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participants_default_to_empty() {
        let activity: Activity = serde_json::from_str(
            r#"{"name":"Art Club","description":"Art","schedule":"Thursdays","max_participants":18}"#,
        )
        .unwrap();

        assert_eq!(activity, Activity::new("Art Club", "Art", "Thursdays", 18));
        assert!(activity.participants.is_empty());
    }
}
