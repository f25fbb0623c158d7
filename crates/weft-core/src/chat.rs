//! Interactive session engine.
//!
//! One `SessionEngine` owns the transcript for one conversation and turns
//! each raw input line into a step outcome: end the session, re-prompt,
//! reply, or apologize. The IO loop in weft-cli stays a thin shell around
//! `step`, so the exit/empty/fallback semantics are testable without a
//! terminal.

use tracing::{error, warn};

use weft_types::chat::{Transcript, Turn};

use crate::chain::{ChainAdapter, ChainReply};

/// Inputs that end the session, compared case-insensitively after trimming.
pub const EXIT_SENTINELS: [&str; 3] = ["exit", "quit", "bye"];

/// Shown when both the primary chain and the fallback fail.
pub const APOLOGY_MESSAGE: &str = "I'm sorry, I'm having technical difficulties right now. \
     Could you please try asking your question again?";

/// What one line of raw input means to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDisposition {
    /// An exit sentinel; the session should end.
    Sentinel,
    /// Empty or whitespace-only; re-prompt without consuming a turn.
    Empty,
    /// A real message (trimmed) to forward to the chain.
    Message(String),
}

/// Classify one raw input line.
pub fn classify_input(raw: &str) -> InputDisposition {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return InputDisposition::Empty;
    }
    if EXIT_SENTINELS
        .iter()
        .any(|s| trimmed.eq_ignore_ascii_case(s))
    {
        return InputDisposition::Sentinel;
    }
    InputDisposition::Message(trimmed.to_string())
}

/// The result of feeding one input line to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The session ended (sentinel received, or it had already ended).
    Ended,
    /// Empty input; ask again.
    Reprompt,
    /// A reply to display.
    Replied {
        answer: String,
        /// Source excerpts, when the chain is retrieval-augmented.
        sources: Vec<String>,
        /// True when the answer came from the fallback path; fallback
        /// exchanges are not recorded in the transcript.
        via_fallback: bool,
    },
    /// Both primary and fallback failed; display [`APOLOGY_MESSAGE`].
    Apology,
}

/// Owns one conversation: transcript, primary chain, and the single
/// direct-model fallback.
pub struct SessionEngine<P: ChainAdapter, F: ChainAdapter> {
    transcript: Transcript,
    primary: P,
    fallback: F,
    active: bool,
}

impl<P: ChainAdapter, F: ChainAdapter> SessionEngine<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self {
            transcript: Transcript::new(),
            primary,
            fallback,
            active: true,
        }
    }

    /// Start from pre-existing history (e.g. loaded from the transcript
    /// store).
    pub fn with_transcript(primary: P, fallback: F, transcript: Transcript) -> Self {
        Self {
            transcript,
            primary,
            fallback,
            active: true,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Feed one raw input line through the session.
    ///
    /// The user+assistant turn pair is committed to the transcript only
    /// after a successful primary invocation; a fallback reply is displayed
    /// but never recorded, since it was produced without the session's
    /// context.
    pub async fn step(&mut self, raw: &str) -> StepOutcome {
        if !self.active {
            return StepOutcome::Ended;
        }

        let text = match classify_input(raw) {
            InputDisposition::Sentinel => {
                self.active = false;
                return StepOutcome::Ended;
            }
            InputDisposition::Empty => return StepOutcome::Reprompt,
            InputDisposition::Message(text) => text,
        };

        match self.primary.invoke(self.transcript.turns(), &text).await {
            Ok(ChainReply { answer, sources }) => {
                self.transcript.push(Turn::user(&text));
                self.transcript.push(Turn::assistant(&answer));
                StepOutcome::Replied {
                    answer,
                    sources,
                    via_fallback: false,
                }
            }
            Err(err) => {
                warn!(%err, "primary chain failed, attempting direct fallback");
                match self.fallback.invoke(&[], &text).await {
                    Ok(ChainReply { answer, .. }) => StepOutcome::Replied {
                        answer,
                        sources: Vec::new(),
                        via_fallback: true,
                    },
                    Err(fallback_err) => {
                        error!(%fallback_err, "fallback failed as well");
                        StepOutcome::Apology
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::StubChain;
    use weft_types::chat::Speaker;

    #[test]
    fn test_classify_sentinels_case_insensitive() {
        for raw in ["exit", "EXIT", " Quit ", "bye", "ByE\n"] {
            assert_eq!(classify_input(raw), InputDisposition::Sentinel, "raw: {raw:?}");
        }
    }

    #[test]
    fn test_classify_empty_and_whitespace() {
        for raw in ["", "   ", "\t\n"] {
            assert_eq!(classify_input(raw), InputDisposition::Empty, "raw: {raw:?}");
        }
    }

    #[test]
    fn test_classify_message_is_trimmed() {
        assert_eq!(
            classify_input("  hello there  "),
            InputDisposition::Message("hello there".to_string())
        );
        // A sentinel embedded in a longer message is just a message.
        assert_eq!(
            classify_input("quit smoking tips"),
            InputDisposition::Message("quit smoking tips".to_string())
        );
    }

    #[tokio::test]
    async fn test_sentinel_ends_without_appending() {
        let mut engine = SessionEngine::new(StubChain::replying("x"), StubChain::replying("y"));

        assert_eq!(engine.step(" EXIT ").await, StepOutcome::Ended);
        assert!(!engine.is_active());
        assert!(engine.transcript().is_empty());

        // Further steps keep reporting Ended.
        assert_eq!(engine.step("hello?").await, StepOutcome::Ended);
    }

    #[tokio::test]
    async fn test_empty_input_reprompts_without_turns() {
        let mut engine = SessionEngine::new(StubChain::replying("x"), StubChain::replying("y"));

        assert_eq!(engine.step("   ").await, StepOutcome::Reprompt);
        assert!(engine.transcript().is_empty());
        assert!(engine.is_active());
    }

    #[tokio::test]
    async fn test_successful_exchange_appends_user_then_assistant() {
        let mut engine =
            SessionEngine::new(StubChain::replying("the answer"), StubChain::failing());

        let outcome = engine.step("a question").await;
        assert_eq!(
            outcome,
            StepOutcome::Replied {
                answer: "the answer".to_string(),
                sources: vec![],
                via_fallback: false,
            }
        );

        let turns = engine.transcript().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker, Speaker::User);
        assert_eq!(turns[0].text, "a question");
        assert_eq!(turns[1].speaker, Speaker::Assistant);
        assert_eq!(turns[1].text, "the answer");
    }

    #[tokio::test]
    async fn test_primary_failure_uses_fallback_and_records_nothing() {
        let mut engine =
            SessionEngine::new(StubChain::failing(), StubChain::replying("fallback answer"));

        let outcome = engine.step("a question").await;
        assert_eq!(
            outcome,
            StepOutcome::Replied {
                answer: "fallback answer".to_string(),
                sources: vec![],
                via_fallback: true,
            }
        );
        assert!(engine.transcript().is_empty());

        // The fallback got the same input, exactly once.
        assert_eq!(
            engine.fallback.inputs.lock().unwrap().clone(),
            vec!["a question".to_string()]
        );
        assert_eq!(engine.primary.inputs.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_double_failure_apologizes_and_continues() {
        let mut engine = SessionEngine::new(
            StubChain::scripted(vec![Err(()), Ok(crate::chain::ChainReply::plain("recovered"))]),
            StubChain::failing(),
        );

        assert_eq!(engine.step("first").await, StepOutcome::Apology);
        assert!(engine.transcript().is_empty());
        assert!(engine.is_active());

        // The loop keeps going: the next exchange succeeds and is recorded.
        let outcome = engine.step("second").await;
        assert!(matches!(outcome, StepOutcome::Replied { via_fallback: false, .. }));
        assert_eq!(engine.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_sources_pass_through() {
        let reply = crate::chain::ChainReply {
            answer: "grounded".to_string(),
            sources: vec!["excerpt".to_string()],
        };
        let mut engine =
            SessionEngine::new(StubChain::scripted(vec![Ok(reply)]), StubChain::failing());

        match engine.step("q").await {
            StepOutcome::Replied { sources, .. } => assert_eq!(sources, vec!["excerpt"]),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_seeded_transcript_is_passed_to_primary() {
        let mut seeded = Transcript::new();
        seeded.push(Turn::user("earlier"));
        seeded.push(Turn::assistant("reply"));

        let mut engine = SessionEngine::with_transcript(
            StubChain::replying("ok"),
            StubChain::failing(),
            seeded,
        );

        engine.step("next").await;
        assert_eq!(engine.transcript().len(), 4);
    }
}
