//! Websites the assistant knows how to open

/// Site name to URL, matched in this order
pub const SITES: &[(&str, &str)] = &[
    ("youtube", "https://www.youtube.com"),
    ("google", "https://www.google.com"),
    ("github", "https://www.github.com"),
    ("stack overflow", "https://stackoverflow.com"),
    ("reddit", "https://www.reddit.com"),
    ("twitter", "https://www.twitter.com"),
    ("facebook", "https://www.facebook.com"),
    ("netflix", "https://www.netflix.com"),
];

/// First known site named in `transcript`, as `(name, url)`
#[must_use]
pub fn find_site(transcript: &str) -> Option<(&'static str, &'static str)> {
    SITES
        .iter()
        .find(|(name, _)| transcript.contains(*name))
        .copied()
}
