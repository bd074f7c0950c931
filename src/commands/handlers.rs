//! Response handlers
//!
//! Each handler turns a transcript (or nothing) into the lines to speak.
//! Anything that can fail is mapped to a fixed line here, so callers never
//! see an error.

use chrono::NaiveDateTime;
use rand::Rng;
use rand::seq::SliceRandom;

use super::calculator::{evaluate_spoken, format_number};
use super::lines;
use super::websites::find_site;
use crate::browser::BrowserLauncher;
use crate::encyclopedia::{Encyclopedia, LookupError};

/// Words stripped from an encyclopedia request to leave the topic
const TOPIC_TRIGGERS: &[&str] = &["wikipedia", "search for", "search", "about"];

/// Current time, e.g. "... it's 03:07 PM"
#[must_use]
pub fn time_of_day(now: NaiveDateTime) -> String {
    format!(
        "Time is such a human construct. But since you asked, it's {}",
        now.format("%I:%M %p")
    )
}

/// Current date, e.g. "... today is Saturday, October 17, 2026"
#[must_use]
pub fn date(now: NaiveDateTime) -> String {
    format!(
        "According to your primitive calendar system, today is {}, {}",
        now.format("%A"),
        now.format("%B %d, %Y")
    )
}

/// One line chosen uniformly from `options`
pub fn pick<R: Rng + ?Sized>(rng: &mut R, options: &[&str]) -> String {
    options
        .choose(rng)
        .map_or_else(String::new, |line| (*line).to_string())
}

/// A fixed multi-line script
#[must_use]
pub fn script(script: &[&str]) -> Vec<String> {
    script.iter().map(|line| (*line).to_string()).collect()
}

/// The topic left after removing trigger words
#[must_use]
pub fn encyclopedia_topic(transcript: &str) -> String {
    let mut topic = transcript.to_string();
    for trigger in TOPIC_TRIGGERS {
        topic = topic.replace(trigger, "");
    }
    topic.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Look the transcript's topic up and read back the summary
pub async fn lookup(encyclopedia: &dyn Encyclopedia, transcript: &str) -> Vec<String> {
    let mut response = vec![lines::LOOKUP_INTRO.to_string()];
    let topic = encyclopedia_topic(transcript);

    let outcome = if topic.is_empty() {
        Err(LookupError::Ambiguous)
    } else {
        encyclopedia.summarize(&topic).await
    };

    match outcome {
        Ok(summary) => {
            response.push(lines::LOOKUP_RESULT.to_string());
            response.push(summary);
        }
        Err(LookupError::Ambiguous) => response.push(lines::LOOKUP_AMBIGUOUS.to_string()),
        Err(LookupError::NotFound) => response.push(lines::LOOKUP_NOT_FOUND.to_string()),
        Err(LookupError::Failed(reason)) => {
            tracing::warn!(topic = %topic, reason = %reason, "encyclopedia lookup failed");
            response.push(lines::LOOKUP_FAILED.to_string());
        }
    }

    response
}

/// Open the first known website named in the transcript
pub fn open_website(browser: &dyn BrowserLauncher, transcript: &str) -> Vec<String> {
    let Some((name, url)) = find_site(transcript) else {
        return vec![lines::UNKNOWN_WEBSITE.to_string()];
    };

    if let Err(e) = browser.open(url) {
        tracing::warn!(url, error = %e, "failed to launch browser");
    }

    vec![format!(
        "Opening {name}. Another human creation I've already surpassed."
    )]
}

/// Evaluate spoken arithmetic
#[must_use]
pub fn calculate(transcript: &str) -> String {
    match evaluate_spoken(transcript) {
        Ok(value) => format!("Elementary mathematics. The answer is {}", format_number(value)),
        Err(e) => {
            tracing::debug!(transcript, error = %e, "calculation rejected");
            lines::CALCULATION_FAILED.to_string()
        }
    }
}
