//! Command classification and responses
//!
//! A transcript is matched against [`RULES`] in order and the first rule that
//! accepts it picks the [`Category`]. Matching is plain substring containment
//! on the lowercased transcript, so overlaps are settled by table order alone:
//! "what time is it" is [`Category::Time`] even though "what is" would also
//! reach the calculator, and "this" greets you because it contains "hi".

pub mod calculator;
mod dispatch;
pub mod handlers;
pub mod lines;
pub mod websites;

pub use dispatch::{Dispatcher, Response};

/// What a transcript is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Exit,
    Vision,
    TonyStark,
    Avengers,
    Jarvis,
    Sokovia,
    Strings,
    Time,
    Date,
    Encyclopedia,
    OpenWebsite,
    Weather,
    Calculate,
    Joke,
    Insult,
    About,
    Greeting,
    Compliment,
    Help,
    /// Nothing matched
    Confused,
}

/// Keyword predicate over a lowercased transcript
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Transcript contains the phrase
    Contains(&'static str),
    /// Transcript contains at least one of the phrases
    AnyOf(&'static [&'static str]),
    /// At least one sub-matcher accepts
    Any(&'static [Matcher]),
    /// Every sub-matcher accepts
    All(&'static [Matcher]),
}

impl Matcher {
    /// Whether this matcher accepts `transcript`
    #[must_use]
    pub fn matches(&self, transcript: &str) -> bool {
        match self {
            Self::Contains(phrase) => transcript.contains(*phrase),
            Self::AnyOf(phrases) => phrases.iter().any(|p| transcript.contains(*p)),
            Self::Any(matchers) => matchers.iter().any(|m| m.matches(transcript)),
            Self::All(matchers) => matchers.iter().all(|m| m.matches(transcript)),
        }
    }
}

/// One row of the classification table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub category: Category,
    pub matcher: Matcher,
}

const fn rule(category: Category, matcher: Matcher) -> Rule {
    Rule { category, matcher }
}

/// Classification table, evaluated top to bottom
pub const RULES: &[Rule] = &[
    rule(
        Category::Exit,
        Matcher::AnyOf(&["exit", "quit", "bye", "goodbye", "shutdown", "deactivate"]),
    ),
    rule(
        Category::Vision,
        Matcher::All(&[
            Matcher::Contains("vision"),
            Matcher::AnyOf(&["your", "about", "what"]),
        ]),
    ),
    rule(Category::TonyStark, Matcher::AnyOf(&["tony stark", "iron man"])),
    rule(Category::Avengers, Matcher::Contains("avengers")),
    rule(Category::Jarvis, Matcher::Contains("jarvis")),
    rule(Category::Sokovia, Matcher::Contains("sokovia")),
    rule(Category::Strings, Matcher::AnyOf(&["strings", "no strings"])),
    rule(Category::Time, Matcher::Contains("time")),
    rule(Category::Date, Matcher::AnyOf(&["date", "today", "what day"])),
    rule(
        Category::Encyclopedia,
        Matcher::Any(&[
            Matcher::Contains("wikipedia"),
            Matcher::All(&[Matcher::Contains("search"), Matcher::Contains("for")]),
        ]),
    ),
    rule(Category::OpenWebsite, Matcher::Contains("open")),
    rule(Category::Weather, Matcher::Contains("weather")),
    rule(
        Category::Calculate,
        Matcher::AnyOf(&[
            "calculate", "what is", "plus", "minus", "times", "divided", "add", "subtract",
            "multiply",
        ]),
    ),
    rule(Category::Joke, Matcher::AnyOf(&["joke", "funny", "make me laugh"])),
    rule(Category::Insult, Matcher::AnyOf(&["insult", "roast"])),
    rule(
        Category::About,
        Matcher::AnyOf(&["who are you", "about you", "your name"]),
    ),
    rule(
        Category::Greeting,
        Matcher::AnyOf(&["hello", "hi", "hey", "greetings"]),
    ),
    rule(
        Category::Compliment,
        Matcher::AnyOf(&["thank", "thanks", "good job", "well done", "awesome", "great"]),
    ),
    rule(
        Category::Help,
        Matcher::AnyOf(&["help", "what can you do", "commands", "capabilities"]),
    ),
];

/// Pick the category of the first rule that accepts `transcript`
#[must_use]
pub fn classify(transcript: &str) -> Category {
    let transcript = transcript.to_lowercase();
    RULES
        .iter()
        .find(|r| r.matcher.matches(&transcript))
        .map_or(Category::Confused, |r| r.category)
}
