//! Listen / respond loop
//!
//! A session is a two-state machine. It stays [`SessionState::Listening`]
//! through every turn, including failed ones, and moves to
//! [`SessionState::Terminated`] only after speaking a farewell for an exit
//! command.

use crate::commands::{Category, Dispatcher, lines};
use crate::voice::{ListenError, SpeechInput, SpeechOutput};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Listening,
    Terminated,
}

/// Drives speech input through the dispatcher to speech output
pub struct Session<I, O> {
    input: I,
    output: O,
    dispatcher: Dispatcher,
    state: SessionState,
}

impl<I: SpeechInput, O: SpeechOutput> Session<I, O> {
    #[must_use]
    pub fn new(input: I, output: O, dispatcher: Dispatcher) -> Self {
        Self {
            input,
            output,
            dispatcher,
            state: SessionState::Listening,
        }
    }

    /// Speak the intro, then run turns until an exit command
    #[allow(clippy::future_not_send)]
    pub async fn run(&mut self) {
        self.say(lines::INTRO.iter().map(|l| (*l).to_string())).await;

        while self.state == SessionState::Listening {
            self.turn().await;
        }

        tracing::info!("session terminated");
    }

    /// One listen cycle
    #[allow(clippy::future_not_send)]
    pub async fn turn(&mut self) -> SessionState {
        match self.input.listen().await {
            Ok(transcript) => self.respond_to(&transcript).await,
            Err(ListenError::Timeout) => self.state,
            Err(ListenError::Unintelligible) => {
                self.say([lines::UNINTELLIGIBLE.to_string()]).await;
                self.state
            }
            Err(ListenError::Service(reason)) => {
                tracing::warn!(reason = %reason, "speech input failed");
                self.say([lines::SPEECH_SERVICE_DOWN.to_string()]).await;
                self.state
            }
        }
    }

    /// Classify and answer one transcript
    #[allow(clippy::future_not_send)]
    pub async fn respond_to(&mut self, transcript: &str) -> SessionState {
        if self.state == SessionState::Terminated || transcript.trim().is_empty() {
            return self.state;
        }

        let (category, response) = self.dispatcher.handle(transcript).await;
        tracing::info!(?category, lines = response.len(), "responding");
        self.say(response).await;

        if category == Category::Exit {
            self.state = SessionState::Terminated;
        }
        self.state
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Give back the input and output
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }

    /// Speak each line in order; a failed line is logged and skipped
    #[allow(clippy::future_not_send)]
    async fn say(&mut self, response: impl IntoIterator<Item = String>) {
        for line in response {
            if let Err(e) = self.output.speak(&line).await {
                tracing::error!(error = %e, line = %line, "failed to speak");
            }
        }
    }
}
