//! Browser launching

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::config::BrowserConfig;
use crate::{Error, Result};

/// Opens URLs in the user's browser
pub trait BrowserLauncher: Send + Sync {
    /// Request that `url` be opened; does not wait for the browser
    ///
    /// # Errors
    ///
    /// Returns error if the launcher cannot be started
    fn open(&self, url: &str) -> Result<()>;
}

/// Platform launcher commands, tried in order
#[cfg(target_os = "macos")]
const CANDIDATES: &[(&str, &[&str])] = &[("open", &[])];

#[cfg(target_os = "windows")]
const CANDIDATES: &[(&str, &[&str])] = &[("cmd", &["/C", "start", ""])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[(&str, &[&str])] = &[
    ("xdg-open", &[]),
    ("gio", &["open"]),
    ("sensible-browser", &[]),
];

/// Launches the system browser as a detached child process
#[derive(Debug, Clone)]
pub struct SystemBrowser {
    program: PathBuf,
    args: Vec<String>,
}

impl SystemBrowser {
    /// Resolve the launcher from configuration or the platform defaults
    ///
    /// # Errors
    ///
    /// Returns error if no launcher is found on `PATH`
    pub fn from_config(config: &BrowserConfig) -> Result<Self> {
        if let Some(command) = &config.command {
            let mut parts = command.split_whitespace();
            let name = parts
                .next()
                .ok_or_else(|| Error::Config("browser command is empty".to_string()))?;
            let program = which::which(name)
                .map_err(|e| Error::Browser(format!("{name} not found: {e}")))?;
            return Ok(Self {
                program,
                args: parts.map(ToString::to_string).collect(),
            });
        }

        CANDIDATES
            .iter()
            .find_map(|(name, args)| {
                which::which(name).ok().map(|program| Self {
                    program,
                    args: args.iter().map(ToString::to_string).collect(),
                })
            })
            .ok_or_else(|| Error::Browser("no browser launcher found on PATH".to_string()))
    }
}

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(Error::Browser(format!("refusing to open non-web URL: {url}")));
        }

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Browser(format!("{}: {e}", self.program.display())))?;

        tracing::info!(url, launcher = %self.program.display(), "opened browser");

        // reap in the background so the launcher doesn't linger as a zombie
        std::thread::spawn(move || {
            if let Err(e) = child.wait() {
                tracing::debug!(error = %e, "browser launcher wait failed");
            }
        });

        Ok(())
    }
}

/// Stand-in when no launcher could be resolved; every open fails
#[derive(Debug, Clone)]
pub struct UnavailableBrowser {
    reason: String,
}

impl UnavailableBrowser {
    #[must_use]
    pub const fn new(reason: String) -> Self {
        Self { reason }
    }
}

impl BrowserLauncher for UnavailableBrowser {
    fn open(&self, url: &str) -> Result<()> {
        Err(Error::Browser(format!("cannot open {url}: {}", self.reason)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_override_is_rejected() {
        let config = BrowserConfig {
            command: Some("   ".to_string()),
        };
        assert!(matches!(SystemBrowser::from_config(&config), Err(Error::Config(_))));
    }

    #[test]
    fn missing_override_is_reported() {
        let config = BrowserConfig {
            command: Some("definitely-not-a-real-browser-binary".to_string()),
        };
        assert!(matches!(SystemBrowser::from_config(&config), Err(Error::Browser(_))));
    }

    #[test]
    fn only_web_urls_are_opened() {
        let browser = SystemBrowser {
            program: PathBuf::from("/nonexistent/launcher"),
            args: Vec::new(),
        };
        assert!(matches!(browser.open("file:///etc/passwd"), Err(Error::Browser(_))));
    }
}
