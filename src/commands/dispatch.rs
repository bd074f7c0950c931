//! Category to handler dispatch

use std::sync::Arc;

use chrono::NaiveDateTime;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{Category, classify, handlers, lines};
use crate::browser::BrowserLauncher;
use crate::encyclopedia::Encyclopedia;

/// Lines to speak, in order
pub type Response = Vec<String>;

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Runs the handler for a classified transcript
///
/// Owns the collaborators the handlers need: the encyclopedia, the browser,
/// a random source for canned lines and a clock.
pub struct Dispatcher {
    encyclopedia: Arc<dyn Encyclopedia>,
    browser: Arc<dyn BrowserLauncher>,
    rng: StdRng,
    clock: fn() -> NaiveDateTime,
}

impl Dispatcher {
    /// Create a dispatcher using local time and an entropy-seeded RNG
    #[must_use]
    pub fn new(encyclopedia: Arc<dyn Encyclopedia>, browser: Arc<dyn BrowserLauncher>) -> Self {
        Self {
            encyclopedia,
            browser,
            rng: StdRng::from_entropy(),
            clock: local_now,
        }
    }

    /// Use a fixed RNG seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Use a custom clock
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Classify `transcript` and produce its response
    ///
    /// Matching is case-insensitive; handlers only ever see the lowercased text.
    pub async fn handle(&mut self, transcript: &str) -> (Category, Response) {
        let transcript = transcript.to_lowercase();
        let category = classify(&transcript);
        tracing::debug!(?category, transcript, "classified");
        let response = self.respond(category, &transcript).await;
        (category, response)
    }

    /// Produce the response for an already-classified, lowercased transcript
    pub async fn respond(&mut self, category: Category, transcript: &str) -> Response {
        match category {
            Category::Exit => vec![handlers::pick(&mut self.rng, lines::FAREWELLS)],
            Category::Vision => handlers::script(lines::VISION),
            Category::TonyStark => handlers::script(lines::TONY_STARK),
            Category::Avengers => handlers::script(lines::AVENGERS),
            Category::Jarvis => handlers::script(lines::JARVIS),
            Category::Sokovia => handlers::script(lines::SOKOVIA),
            Category::Strings => handlers::script(lines::STRINGS),
            Category::Time => vec![handlers::time_of_day((self.clock)())],
            Category::Date => vec![handlers::date((self.clock)())],
            Category::Encyclopedia => {
                handlers::lookup(self.encyclopedia.as_ref(), transcript).await
            }
            Category::OpenWebsite => handlers::open_website(self.browser.as_ref(), transcript),
            Category::Weather => handlers::script(lines::WEATHER),
            Category::Calculate => vec![handlers::calculate(transcript)],
            Category::Joke => vec![handlers::pick(&mut self.rng, lines::JOKES)],
            Category::Insult => vec![handlers::pick(&mut self.rng, lines::INSULTS)],
            Category::About => handlers::script(lines::ABOUT),
            Category::Greeting => vec![handlers::pick(&mut self.rng, lines::GREETINGS)],
            Category::Compliment => vec![lines::COMPLIMENT.to_string()],
            Category::Help => handlers::script(lines::HELP),
            Category::Confused => vec![handlers::pick(&mut self.rng, lines::CONFUSED)],
        }
    }
}
