//! Instruction text handed to the voice agent.
//!
//! The brief is built once from an already resolved lesson and never edited
//! afterwards; a new session resolves a new lesson and builds a new brief.

use crate::domain::{ResolvedLesson, SourceKind};

pub const OPENING_TURN: &str = "Greet the user warmly.
Tell them you're ready to help them practice English.
Then read the lesson text.
After that, ask them what they think about the topic.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorBrief {
    source: SourceKind,
    instructions: String,
}

impl TutorBrief {
    pub fn new(lesson: &ResolvedLesson) -> Self {
        let instructions = format!(
            "You are an English Tutor.
Your task is to read the lesson text below to the user clearly and slowly.

LESSON TEXT:
\"{}\"

After reading, engage in a conversation about it.
Correct the user if they make grammar mistakes.
Keep responses conversational and natural for voice interaction.
Speak clearly and at a moderate pace suitable for English learners.",
            lesson.text.trim()
        );

        Self {
            source: lesson.source,
            instructions,
        }
    }

    /// System prompt for the agent, lesson text included.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Instruction for the agent's first spoken turn.
    pub fn opening_turn(&self) -> &'static str {
        OPENING_TURN
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }
}
