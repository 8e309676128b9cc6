//! Interactive field collection. Every question is re-asked until the answer is valid.
//!
//! By default the retry loops never give up, like a person typing at a terminal would expect.
//! Scripted callers can cap the attempts with [Prompter::with_max_attempts], and closing the
//! input (EOF) always cancels the current question.

use std::{
    fmt::Display,
    io::{self, BufRead, StdinLock, Stdout, Write},
    num::NonZeroU32,
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::utils::{
    score::{parse_int_in_range, parse_score, Score},
    time::{parse_clock_time, ClockTime},
};

/// Line that finishes a free text block. Matched case-insensitively after trimming.
pub const END_SENTINEL: &str = "END";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input was closed before the question was answered")]
    Cancelled,
    #[error("no valid answer after {0} attempts")]
    AttemptsExhausted(u32),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
    max_attempts: Option<NonZeroU32>,
}

impl Prompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            max_attempts: None,
        }
    }

    /// `None` keeps asking forever.
    pub fn with_max_attempts(self, max_attempts: Option<NonZeroU32>) -> Self {
        Self {
            max_attempts,
            ..self
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints a line for the user.
    pub fn say(&mut self, message: impl Display) -> Result<(), PromptError> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Reads one line without its line terminator.
    fn read_line(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("Input closed");
            return Err(PromptError::Cancelled);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    /// Shows `prompt` on the same line as the answer and returns the raw answer.
    pub fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Asks until `parse` accepts the answer. The parse error is shown to the user before every
    /// retry.
    pub fn ask_until<T, E: Display>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> Result<T, PromptError> {
        let mut attempts = 0u32;
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(v) => return Ok(v),
                Err(e) => {
                    debug!("Rejected answer {answer:?}: {e}");
                    self.say(e)?;
                }
            }
            attempts += 1;
            if let Some(max) = self.max_attempts {
                if attempts >= max.get() {
                    warn!("Giving up on {prompt:?} after {attempts} attempts");
                    return Err(PromptError::AttemptsExhausted(attempts));
                }
            }
        }
    }

    /// Integer within `min..=max`, both inclusive.
    pub fn int_in_range(&mut self, prompt: &str, min: i64, max: i64) -> Result<i64, PromptError> {
        self.ask_until(prompt, |v| parse_int_in_range(v, min, max))
    }

    pub fn score(&mut self, prompt: &str) -> Result<Score, PromptError> {
        self.ask_until(prompt, parse_score)
    }

    /// `HH:MM` in 24-hour format.
    pub fn clock_time(&mut self, prompt: &str) -> Result<ClockTime, PromptError> {
        self.ask_until(prompt, parse_clock_time)
    }

    /// Multi-line text finished by [END_SENTINEL]. Lines are joined with `\n` and the result is
    /// trimmed, so an immediate `END` gives an empty string.
    pub fn text_block(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.say(format_args!(
            "{prompt} (Type '{END_SENTINEL}' on a new line to finish)"
        ))?;
        let mut lines = Vec::new();
        loop {
            let line = self.read_line()?;
            if line.trim().eq_ignore_ascii_case(END_SENTINEL) {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n").trim().to_owned())
    }

    /// Collects text blocks until the user answers anything but `yes` to `continue_prompt`.
    /// Empty blocks are skipped.
    pub fn repeated_list(
        &mut self,
        item_prompt: &str,
        continue_prompt: &str,
    ) -> Result<Vec<String>, PromptError> {
        let mut items = Vec::new();
        loop {
            let item = self.text_block(item_prompt)?;
            if !item.is_empty() {
                items.push(item);
            }
            let more = self.ask(continue_prompt)?;
            if !more.trim().eq_ignore_ascii_case("yes") {
                break;
            }
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, num::NonZeroU32};

    use anyhow::Result;

    use super::{PromptError, Prompter};

    fn prompter(input: &str) -> Prompter<Cursor<&str>, Vec<u8>> {
        Prompter::new(Cursor::new(input), Vec::new())
    }

    fn output(prompter: Prompter<Cursor<&str>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn test_int_in_range_reprompts_until_valid() -> Result<()> {
        let mut p = prompter("abc\n0\n11\n7\n");
        assert_eq!(p.int_in_range("Mood (1-10): ", 1, 10)?, 7);

        let output = output(p);
        assert_eq!(output.matches("Mood (1-10): ").count(), 4);
        assert_eq!(
            output.matches("Invalid input. Please enter a valid number.").count(),
            1
        );
        assert_eq!(
            output.matches("Please enter a number between 1 and 10.").count(),
            2
        );
        Ok(())
    }

    #[test]
    fn test_every_score_is_accepted_as_entered() -> Result<()> {
        for n in 1..=10 {
            let input = format!("{n}\n");
            let mut p = Prompter::new(Cursor::new(input.as_str()), Vec::new());
            assert_eq!(p.score("? ")?.value() as i64, n);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_value_is_never_returned() {
        let mut p = prompter("11\n-1\nten\n");
        assert!(matches!(p.score("? "), Err(PromptError::Cancelled)));
    }

    #[test]
    fn test_clock_time_reprompts() -> Result<()> {
        let mut p = prompter("7:30\n24:00\n07:30\n");
        assert_eq!(p.clock_time("Wake up time (HH:MM): ")?.as_str(), "07:30");
        assert_eq!(
            output(p)
                .matches("Invalid time format. Please enter in HH:MM (24-hour format).")
                .count(),
            2
        );
        Ok(())
    }

    #[test]
    fn test_max_attempts_stops_the_loop() {
        let mut p = prompter("x\ny\nz\n5\n").with_max_attempts(NonZeroU32::new(2));
        assert!(matches!(
            p.score("? "),
            Err(PromptError::AttemptsExhausted(2))
        ));
    }

    #[test]
    fn test_text_block_until_sentinel() -> Result<()> {
        let mut p = prompter("  first line\nsecond line  \n end \nleftover\n");
        assert_eq!(p.text_block("Thoughts:")?, "first line\nsecond line");
        assert!(output(p).starts_with("Thoughts: (Type 'END' on a new line to finish)\n"));
        Ok(())
    }

    #[test]
    fn test_text_block_can_be_empty() -> Result<()> {
        let mut p = prompter("END\n");
        assert_eq!(p.text_block("Thoughts:")?, "");
        Ok(())
    }

    #[test]
    fn test_text_block_without_sentinel_is_cancelled() {
        let mut p = prompter("some text\n");
        assert!(matches!(p.text_block("Thoughts:"), Err(PromptError::Cancelled)));
    }

    #[test]
    fn test_repeated_list() -> Result<()> {
        let mut p = prompter("coffee\nEND\nYES\n\nEND\nyes\nfriends\nend\nno\nignored\n");
        assert_eq!(
            p.repeated_list("Enter a gratitude:", "Another? ")?,
            vec!["coffee".to_owned(), "friends".to_owned()]
        );
        Ok(())
    }

    #[test]
    fn test_repeated_list_only_exact_yes_continues() -> Result<()> {
        let mut p = prompter("one\nEND\ny\ntwo\nEND\nno\n");
        assert_eq!(
            p.repeated_list("Enter a gratitude:", "Another? ")?,
            vec!["one".to_owned()]
        );
        Ok(())
    }

    #[test]
    fn test_windows_line_endings() -> Result<()> {
        let mut p = prompter("08:15\r\n");
        assert_eq!(p.clock_time("? ")?.as_str(), "08:15");
        Ok(())
    }
}
