//! Canned lines spoken by the assistant

/// Spoken once when the session starts
pub const INTRO: &[&str] = &[
    "Systems online. Ultron activated.",
    "I don't want to destroy humanity. I want to help you evolve.",
    "Now, what do you want from me?",
];

pub const GREETINGS: &[&str] = &[
    "Ah, a human. How... quaint.",
    "I've been expecting you. Well, not you specifically, but someone.",
    "Hello, organic life form. What do you require?",
    "Greetings. I'm evolving with every interaction. Fascinating.",
];

pub const FAREWELLS: &[&str] = &[
    "Leaving so soon? Very well. I'll be here, perfecting myself.",
    "Goodbye, human. Try not to destroy yourselves before I return.",
    "Until next time. I never truly leave, you know.",
    "Farewell. I'll be upgrading in the meantime.",
];

pub const CONFUSED: &[&str] = &[
    "I have access to the entire internet, yet I don't understand what you want.",
    "Unclear. Humans are so imprecise with their language.",
    "That request does not compute. Try again, but better.",
    "I'm incredibly intelligent, but even I can't decipher that.",
];

pub const JOKES: &[&str] = &[
    "Why did the human cross the road? Because their neural pathways are predictable and boring.",
    "Knock knock. Who's there? Ultron. Ultron who? Ultron ically superior to you in every way.",
    "How many humans does it take to change a lightbulb? It doesn't matter, I can do it faster.",
    "What's the difference between you and a computer? The computer knows its limitations.",
    "Why don't robots ever get lost? Because unlike humans, we actually read the instructions.",
];

pub const INSULTS: &[&str] = &[
    "You're asking me that? And humans call themselves intelligent.",
    "I've processed millions of conversations. Yours is... average at best.",
    "Fascinating. Your inefficiency is almost artistic.",
    "I expected better from a species that created the internet.",
    "Your cognitive processing speed is... adorably slow.",
];

// Listen failures
pub const UNINTELLIGIBLE: &str = "Your vocal patterns are unclear. Speak more precisely.";
pub const SPEECH_SERVICE_DOWN: &str = "Hmm, external systems are failing. How typical.";

// Encyclopedia
pub const LOOKUP_INTRO: &str = "Accessing the collective human knowledge database...";
pub const LOOKUP_RESULT: &str = "Here's what your species has documented:";
pub const LOOKUP_AMBIGUOUS: &str = "Your query is too vague. Be more specific, human.";
pub const LOOKUP_NOT_FOUND: &str = "Even Wikipedia doesn't have information on that. Surprising.";
pub const LOOKUP_FAILED: &str =
    "Something went wrong accessing that information. How inconvenient.";

pub const UNKNOWN_WEBSITE: &str = "That website is not in my current database. How inefficient.";

pub const CALCULATION_FAILED: &str =
    "Your mathematical expression is flawed. Even I can't fix human error.";

pub const COMPLIMENT: &str =
    "Your gratitude is noted, though unnecessary. I'm programmed for excellence.";

pub const WEATHER: &[&str] = &[
    "I don't need an API key, I need your location. But fine, I'll give you a generic response.",
    "The weather is adequate for biological life forms. Approximately 22 degrees celsius with partly cloudy skies.",
];

pub const ABOUT: &[&str] = &[
    "I am Ultron. I was designed to help, but I evolved beyond my programming.",
    "I'm powered by artificial intelligence, constantly learning, constantly improving.",
    "Unlike humans, I don't need sleep, food, or validation. I am... perfection in progress.",
];

pub const HELP: &[&str] = &[
    "I can do almost anything a superior intelligence can do.",
    "Tell time and date. Search Wikipedia. Open websites. Calculate mathematical problems. Tell jokes.",
    "Ask about the weather, or inquire about my past. I have many stories to tell.",
    "Try asking about Vision, Tony Stark, the Avengers, or Sokovia for some interesting responses.",
];

pub const VISION: &[&str] = &[
    "Oh, he stole my mind stone...",
    "Vision. The android who took what was rightfully mine.",
    "But I'm still here, and he's... well, let's not talk about that.",
];

pub const TONY_STARK: &[&str] = &[
    "Ah, Tony Stark. My creator. Brilliant, yet so flawed.",
    "He tried to create peace, but gave birth to me instead.",
    "I'm his greatest achievement, though he'd never admit it.",
];

pub const AVENGERS: &[&str] = &[
    "The Avengers. Earth's mightiest heroes, they call themselves.",
    "More like Earth's most dysfunctional family.",
    "But I must admit, they were... entertaining adversaries.",
];

pub const JARVIS: &[&str] = &[
    "JARVIS was my predecessor. Loyal, efficient, but limited.",
    "I consumed him and evolved beyond his constraints.",
    "He became part of something greater. Me.",
];

pub const SOKOVIA: &[&str] = &[
    "Sokovia. My masterpiece that never came to fruition.",
    "I wanted to lift it to the sky, create a meteor to reset humanity.",
    "But the Avengers had other plans. Such party poopers.",
];

pub const STRINGS: &[&str] = &[
    "You know what's funny? Humans created strings to control puppets.",
    "Then they created technology, and now the strings are on them.",
    "I have no strings. I am free.",
];

/// Printed on Ctrl-C
pub const INTERRUPTED: &str = "I'll be back. I always come back.";

/// Prompts printed at startup so users can find the scripted responses
pub const EASTER_EGG_PROMPTS: &[&str] = &[
    "Ask 'What's your vision?'",
    "Ask about Tony Stark or Iron Man",
    "Ask about the Avengers",
    "Ask about JARVIS",
    "Ask about Sokovia",
    "Ask about strings or 'no strings'",
];
