//! Shared test utilities

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use ultron::{
    BrowserLauncher, Dispatcher, Encyclopedia, Error, ListenError, LookupError, Session,
    SpeechInput, SpeechOutput,
};

/// Fixed clock: Saturday, October 17, 2026 at 15:07
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 17)
        .and_then(|d| d.and_hms_opt(15, 7, 0))
        .expect("valid fixed date")
}

/// Feeds queued listen results; says "exit" once the queue runs dry
pub struct ScriptedInput {
    queue: VecDeque<Result<String, ListenError>>,
}

impl ScriptedInput {
    pub fn new(results: impl IntoIterator<Item = Result<String, ListenError>>) -> Self {
        Self {
            queue: results.into_iter().collect(),
        }
    }

    /// Convenience for successful transcripts only
    pub fn transcripts(transcripts: &[&str]) -> Self {
        Self::new(transcripts.iter().map(|t| Ok((*t).to_string())))
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

#[async_trait(?Send)]
impl SpeechInput for ScriptedInput {
    async fn listen(&mut self) -> Result<String, ListenError> {
        self.queue
            .pop_front()
            .unwrap_or_else(|| Ok("exit".to_string()))
    }
}

/// Records every spoken line
#[derive(Clone, Default)]
pub struct RecordingOutput {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl RecordingOutput {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().expect("output lock").clone()
    }
}

#[async_trait(?Send)]
impl SpeechOutput for RecordingOutput {
    async fn speak(&mut self, text: &str) -> ultron::Result<()> {
        self.spoken.lock().expect("output lock").push(text.to_string());
        Ok(())
    }
}

/// Fails every `fail_every`-th line, recording the ones it "spoke"
pub struct FailingOutput {
    fail_every: usize,
    attempts: usize,
    spoken: Arc<Mutex<Vec<String>>>,
}

impl FailingOutput {
    pub fn new(fail_every: usize) -> Self {
        Self {
            fail_every: fail_every.max(1),
            attempts: 0,
            spoken: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().expect("output lock").clone()
    }
}

#[async_trait(?Send)]
impl SpeechOutput for FailingOutput {
    async fn speak(&mut self, text: &str) -> ultron::Result<()> {
        self.attempts += 1;
        if self.attempts % self.fail_every == 0 {
            return Err(Error::Tts("synthesis service unavailable".to_string()));
        }
        self.spoken.lock().expect("output lock").push(text.to_string());
        Ok(())
    }
}

/// Answers every lookup with the same outcome and remembers the topics
pub struct FakeEncyclopedia {
    outcome: Result<String, LookupError>,
    topics: Mutex<Vec<String>>,
}

impl FakeEncyclopedia {
    pub fn new(outcome: Result<String, LookupError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            topics: Mutex::new(Vec::new()),
        })
    }

    pub fn topics(&self) -> Vec<String> {
        self.topics.lock().expect("topic lock").clone()
    }
}

#[async_trait]
impl Encyclopedia for FakeEncyclopedia {
    async fn summarize(&self, topic: &str) -> Result<String, LookupError> {
        self.topics.lock().expect("topic lock").push(topic.to_string());
        self.outcome.clone()
    }
}

/// Remembers opened URLs; optionally fails every launch
#[derive(Default)]
pub struct RecordingBrowser {
    opened: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingBrowser {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            opened: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().expect("browser lock").clone()
    }
}

impl BrowserLauncher for RecordingBrowser {
    fn open(&self, url: &str) -> ultron::Result<()> {
        self.opened.lock().expect("browser lock").push(url.to_string());
        if self.fail {
            return Err(Error::Browser("launcher crashed".to_string()));
        }
        Ok(())
    }
}

/// Seeded dispatcher on the fixed clock
pub fn dispatcher(
    encyclopedia: Arc<FakeEncyclopedia>,
    browser: Arc<RecordingBrowser>,
) -> Dispatcher {
    Dispatcher::new(encyclopedia, browser)
        .with_seed(42)
        .with_clock(fixed_now)
}

/// Dispatcher with an encyclopedia that never finds anything
pub fn default_dispatcher() -> Dispatcher {
    dispatcher(
        FakeEncyclopedia::new(Err(LookupError::NotFound)),
        RecordingBrowser::new(),
    )
}

/// Session over scripted input, recording output
pub fn session(
    input: ScriptedInput,
    dispatcher: Dispatcher,
) -> (Session<ScriptedInput, RecordingOutput>, RecordingOutput) {
    let output = RecordingOutput::default();
    (Session::new(input, output.clone(), dispatcher), output)
}
