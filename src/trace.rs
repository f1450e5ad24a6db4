//! Episode action traces and the shared output file they are written to
//!
//! The output file is polled by an external game client which may hold it
//! open between writes. Every write therefore reopens the file (first write
//! truncates, later writes append) and retries on failure under a bounded
//! [`RetryPolicy`] with exponential backoff, instead of blocking forever the
//! way an unbounded retry loop would.

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use crate::{
    error::{Error, Result},
    sokoban::Action,
};

/// Ordered sequence of actions chosen during one episode, append-only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTrace {
    actions: Vec<Action>,
}

impl ActionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// One letter per action: U, R, D or L.
    pub fn to_letters(&self) -> String {
        self.actions.iter().map(|a| a.to_letter()).collect()
    }
}

/// Consumer of finished episode traces
///
/// The training pipeline's output port: implemented by [`TraceWriter`] for
/// the shared file, and by [`MemorySink`] for tests.
pub trait TraceSink {
    /// Record one finished episode.
    fn write_episode(&mut self, trace: &ActionTrace) -> Result<()>;

    /// Mark the end of the run (after the inference episode).
    fn finish(&mut self) -> Result<()>;
}

/// Bounded retry with exponential backoff for contended writes
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempts before giving up
    pub max_attempts: usize,
    /// Sleep after the first failure
    pub initial_delay: Duration,
    /// Backoff ceiling (delay doubles up to this)
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            initial_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(500),
        }
    }
}

/// Writes action traces to the shared output file
///
/// One line of letters per training episode in the order taken, then the
/// inference episode's line, then a final line `END`.
#[derive(Debug)]
pub struct TraceWriter {
    path: PathBuf,
    policy: RetryPolicy,
    episodes_written: usize,
}

impl TraceWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_policy(path, RetryPolicy::default())
    }

    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RetryPolicy) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            policy,
            episodes_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        let truncate = self.episodes_written == 0;
        let mut delay = self.policy.initial_delay;
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_write(line, truncate) {
                Ok(()) => return Ok(()),
                Err(source) if attempt >= self.policy.max_attempts => {
                    return Err(Error::TraceWrite {
                        path: self.path.clone(),
                        attempts: attempt,
                        source,
                    });
                }
                Err(_) => {
                    thread::sleep(delay);
                    delay = (delay * 2).min(self.policy.max_delay);
                }
            }
        }
    }

    /// Scoped open-write-close so the polling reader sees whole lines and
    /// never finds the file held open between writes.
    fn try_write(&self, line: &str, truncate: bool) -> std::io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true);
        if truncate {
            options.truncate(true);
        } else {
            options.append(true);
        }
        let mut file = options.open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

impl TraceSink for TraceWriter {
    fn write_episode(&mut self, trace: &ActionTrace) -> Result<()> {
        let mut line = trace.to_letters();
        line.push('\n');
        self.write_line(&line)?;
        self.episodes_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.write_line("END\n")
    }
}

/// In-memory sink for tests and programmatic consumers
#[derive(Debug, Default)]
pub struct MemorySink {
    traces: Vec<ActionTrace>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn traces(&self) -> &[ActionTrace] {
        &self.traces
    }

    pub fn finished(&self) -> bool {
        self.finished
    }
}

impl TraceSink for MemorySink {
    fn write_episode(&mut self, trace: &ActionTrace) -> Result<()> {
        self.traces.push(trace.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
