//! Ultron - a voice command dispatcher with a sardonic AI persona
//!
//! Spoken requests are transcribed, matched against an ordered keyword table
//! and answered with canned or computed lines.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   transcript   ┌────────────┐  category  ┌────────────┐
//! │ SpeechInput  │ ─────────────► │ classifier │ ─────────► │ Dispatcher │
//! │ mic+STT/text │                └────────────┘            └─────┬──────┘
//! └──────────────┘                                                │ lines
//!        ▲                                                        ▼
//!        │            Session (Listening → Terminated)     ┌──────────────┐
//!        └──────────────────────────────────────────────── │ SpeechOutput │
//!                                                          │ TTS+speaker  │
//!                                                          └──────────────┘
//! ```
//!
//! The dispatcher reaches the outside world through [`Encyclopedia`] and
//! [`BrowserLauncher`].

pub mod browser;
pub mod commands;
pub mod config;
pub mod encyclopedia;
pub mod error;
pub mod session;
pub mod voice;

pub use browser::{BrowserLauncher, SystemBrowser, UnavailableBrowser};
pub use commands::{Category, Dispatcher, Response, classify};
pub use config::Config;
pub use encyclopedia::{Encyclopedia, LookupError, WikipediaClient};
pub use error::{Error, Result};
pub use session::{Session, SessionState};
pub use voice::{ListenError, SpeechInput, SpeechOutput};
