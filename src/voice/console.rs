//! Text-mode speech input and output
//!
//! Lets the session run headless: each stdin line is one transcript, each
//! spoken line is printed.

use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use super::{ListenError, SpeechInput, SpeechOutput};
use crate::Result;

/// Transcript fed to the session when input is exhausted
const END_OF_INPUT: &str = "exit";

/// Reads one transcript per line
pub struct ConsoleInput<R> {
    lines: Lines<R>,
}

impl ConsoleInput<BufReader<Stdin>> {
    /// Read transcripts from stdin
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> ConsoleInput<R> {
    /// Read transcripts from any buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait(?Send)]
impl<R: AsyncBufRead + Unpin> SpeechInput for ConsoleInput<R> {
    async fn listen(&mut self) -> std::result::Result<String, ListenError> {
        match self.lines.next_line().await {
            Ok(Some(line)) => Ok(line.trim().to_lowercase()),
            Ok(None) => {
                tracing::debug!("input closed, ending session");
                Ok(END_OF_INPUT.to_string())
            }
            Err(e) => Err(ListenError::Service(e.to_string())),
        }
    }
}

/// Prints each spoken line
pub struct ConsoleOutput<W> {
    writer: W,
}

impl ConsoleOutput<std::io::Stdout> {
    /// Print to stdout
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleOutput<W> {
    /// Print to any writer
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait(?Send)]
impl<W: Write> SpeechOutput for ConsoleOutput<W> {
    async fn speak(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "[ULTRON SPEAKING]: {text}")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lines_become_lowercase_transcripts() {
        let mut input = ConsoleInput::new(BufReader::new(&b"What TIME is it\n\n"[..]));
        assert_eq!(input.listen().await.unwrap(), "what time is it");
        assert_eq!(input.listen().await.unwrap(), "");
        assert_eq!(input.listen().await.unwrap(), END_OF_INPUT);
    }

    #[tokio::test]
    async fn output_prefixes_each_line() {
        let mut output = ConsoleOutput::new(Vec::new());
        output.speak("one").await.unwrap();
        output.speak("two").await.unwrap();
        let printed = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(printed, "[ULTRON SPEAKING]: one\n[ULTRON SPEAKING]: two\n");
    }
}
