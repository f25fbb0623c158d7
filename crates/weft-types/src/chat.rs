//! Conversation turn types.
//!
//! A `Turn` is one exchange unit (speaker + text); a `Transcript` is the
//! ordered, append-only history a session accumulates. The speaker is an
//! explicit tagged enum so formatting never relies on runtime type
//! inspection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "user"),
            Speaker::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for Speaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Speaker::User),
            "assistant" => Ok(Speaker::Assistant),
            other => Err(format!("invalid speaker: '{other}'")),
        }
    }
}

impl Speaker {
    /// Display label used when rendering a transcript into prompt text.
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::User => "User",
            Speaker::Assistant => "Assistant",
        }
    }
}

/// One exchange unit in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// Ordered, append-only sequence of turns for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a transcript from existing turns (e.g. loaded from storage).
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Render the transcript as prompt text, one `Label: text` line per turn.
    pub fn render(&self) -> String {
        render_turns(&self.turns)
    }
}

/// Render a slice of turns as prompt text, one `Label: text` line per turn.
pub fn render_turns(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.speaker.label(), t.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A turn as persisted in the relational transcript store, keyed by a
/// thread name so multiple conversations can share one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTurn {
    pub id: Uuid,
    pub thread: String,
    pub speaker: Speaker,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl StoredTurn {
    /// Wrap a turn for persistence under the given thread.
    pub fn new(thread: impl Into<String>, turn: &Turn) -> Self {
        Self {
            id: Uuid::now_v7(),
            thread: thread.into(),
            speaker: turn.speaker,
            text: turn.text.clone(),
            created_at: Utc::now(),
        }
    }

    /// Project back to the in-memory turn shape.
    pub fn to_turn(&self) -> Turn {
        Turn {
            speaker: self.speaker,
            text: self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_roundtrip() {
        for speaker in [Speaker::User, Speaker::Assistant] {
            let s = speaker.to_string();
            let parsed: Speaker = s.parse().unwrap();
            assert_eq!(speaker, parsed);
        }
    }

    #[test]
    fn test_transcript_append_order() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::user("hello"));
        transcript.push(Turn::assistant("hi there"));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].speaker, Speaker::User);
        assert_eq!(transcript.turns()[1].speaker, Speaker::Assistant);
    }

    #[test]
    fn test_transcript_render_labels() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::user("who are you?"));
        transcript.push(Turn::assistant("a helpful assistant"));

        let rendered = transcript.render();
        assert_eq!(rendered, "User: who are you?\nAssistant: a helpful assistant");
    }

    #[test]
    fn test_empty_transcript_renders_empty() {
        assert_eq!(Transcript::new().render(), "");
        assert!(Transcript::new().is_empty());
    }

    #[test]
    fn test_stored_turn_projection() {
        let turn = Turn::assistant("persisted");
        let stored = StoredTurn::new("memory_demo", &turn);
        assert_eq!(stored.thread, "memory_demo");
        assert_eq!(stored.to_turn(), turn);
    }
}
