//! Line-oriented console collaborators.
//!
//! - [`StdConsole`]: stdin/stdout with a `> ` prompt
//! - [`ScriptedConsole`]: replays queued lines and records everything written,
//!   used by tests and demos
//!
//! Reading past the last line, an interrupted read or a raised interrupt
//! flag yields [`LauncherError::EndOfInput`].

use crate::core::error::{LauncherError, Result};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Write};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const PROMPT: &str = "> ";

pub trait Console {
    /// Read one trimmed line
    fn read_line(&mut self) -> Result<String>;

    fn write(&mut self, text: &str) -> Result<()>;
}

/// How often a pending read checks the interrupt flag
const INTERRUPT_POLL: Duration = Duration::from_millis(100);

/// Console bound to the process's standard streams
///
/// Lines are read on a background thread, so a pending read can be abandoned
/// when the interrupt flag is raised (Ctrl-C in the binary).
#[derive(Debug)]
pub struct StdConsole {
    lines: Receiver<io::Result<String>>,
    interrupted: Arc<AtomicBool>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self::with_input(BufReader::new(io::stdin()))
    }

    /// Read lines from `input` instead of stdin
    pub fn with_input<R: BufRead + Send + 'static>(input: R) -> Self {
        let (tx, lines) = mpsc::channel();
        thread::spawn(move || forward_lines(input, &tx));
        Self {
            lines,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Raising this flag ends the pending or next read as end of input
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_line(&mut self) -> Result<String> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(PROMPT.as_bytes())?;
        stdout.flush()?;
        drop(stdout);

        loop {
            if self.interrupted.swap(false, Ordering::SeqCst) {
                log::info!("Input interrupted");
                return Err(LauncherError::EndOfInput);
            }
            match self.lines.recv_timeout(INTERRUPT_POLL) {
                Ok(Ok(line)) => return Ok(line.trim().to_string()),
                Ok(Err(e)) if is_end_of_input(&e) => return Err(LauncherError::EndOfInput),
                Ok(Err(e)) => return Err(LauncherError::Io(e)),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Err(LauncherError::EndOfInput),
            }
        }
    }

    fn write(&mut self, text: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Send every line of `input` until end of input or a read error
fn forward_lines<R: BufRead>(mut input: R, tx: &Sender<io::Result<String>>) {
    loop {
        let mut line = String::new();
        let result = match input.read_line(&mut line) {
            Ok(0) => return,
            Ok(_) => Ok(line),
            Err(e) => Err(e),
        };
        let failed = result.is_err();
        if tx.send(result).is_err() || failed {
            return;
        }
    }
}

fn is_end_of_input(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted | io::ErrorKind::BrokenPipe
    )
}

/// Shared view of everything a [`ScriptedConsole`] wrote
#[derive(Debug, Default, Clone)]
pub struct Transcript(Rc<RefCell<String>>);

impl Transcript {
    pub fn text(&self) -> String {
        self.0.borrow().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.borrow().contains(needle)
    }

    /// Number of non-overlapping occurrences of `needle`
    pub fn count(&self, needle: &str) -> usize {
        self.0.borrow().matches(needle).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, text: &str) {
        self.0.borrow_mut().push_str(text);
    }
}

/// Console that replays a fixed list of input lines
///
/// Each consumed line is echoed to the transcript after the prompt, so a
/// transcript reads like a terminal session.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    transcript: Transcript,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: Transcript::default(),
        }
    }

    pub fn transcript(&self) -> Transcript {
        self.transcript.clone()
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> Result<String> {
        let line = self.inputs.pop_front().ok_or(LauncherError::EndOfInput)?;
        self.transcript.push(PROMPT);
        self.transcript.push(&line);
        self.transcript.push("\n");
        Ok(line.trim().to_string())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.transcript.push(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_console_replays_lines() {
        let mut console = ScriptedConsole::new(["  1 ", "help"]);
        assert_eq!(console.read_line().unwrap(), "1");
        assert_eq!(console.read_line().unwrap(), "help");
        assert_eq!(console.remaining(), 0);
        assert!(matches!(console.read_line(), Err(LauncherError::EndOfInput)));
    }

    #[test]
    fn test_transcript_records_writes_and_echo() {
        let mut console = ScriptedConsole::new(["2"]);
        let transcript = console.transcript();
        console.write("Make your choice.\n").unwrap();
        console.read_line().unwrap();
        assert_eq!(transcript.text(), "Make your choice.\n> 2\n");
        assert_eq!(transcript.count("choice"), 1);

        transcript.clear();
        assert!(transcript.text().is_empty());
    }

    /// Input that never produces a line
    struct Stalled;

    impl io::Read for Stalled {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            loop {
                thread::sleep(Duration::from_secs(1));
            }
        }
    }

    #[test]
    fn test_std_console_reads_until_end_of_input() {
        let mut console = StdConsole::with_input(io::Cursor::new("2\n  help \n"));
        assert_eq!(console.read_line().unwrap(), "2");
        assert_eq!(console.read_line().unwrap(), "help");
        assert!(matches!(console.read_line(), Err(LauncherError::EndOfInput)));
    }

    #[test]
    fn test_interrupt_ends_pending_read() {
        let mut console = StdConsole::with_input(BufReader::new(Stalled));
        let flag = console.interrupt_flag();
        let raiser = thread::spawn(move || {
            thread::sleep(Duration::from_millis(150));
            flag.store(true, Ordering::SeqCst);
        });
        assert!(matches!(console.read_line(), Err(LauncherError::EndOfInput)));
        raiser.join().unwrap();
    }

    #[test]
    fn test_end_of_input_kinds() {
        assert!(is_end_of_input(&io::Error::from(io::ErrorKind::Interrupted)));
        assert!(is_end_of_input(&io::Error::from(io::ErrorKind::UnexpectedEof)));
        assert!(!is_end_of_input(&io::Error::from(io::ErrorKind::PermissionDenied)));
    }
}
