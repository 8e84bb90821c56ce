use std::io::{self, ErrorKind, Read, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, debug_span, warn};

use super::{frame_response, Analyzer, AnalyzerError};
use crate::settings::AnalyzerSettings;

/// Protocol parameters for an interactive analyzer process.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    pub prompt: String,
    pub startup_timeout: Duration,
    pub query_timeout: Duration,
}

impl From<&AnalyzerSettings> for AnalyzerOptions {
    fn from(s: &AnalyzerSettings) -> Self {
        Self {
            prompt: s.prompt.clone(),
            startup_timeout: s.startup_timeout(),
            query_timeout: s.query_timeout(),
        }
    }
}

/// One persistent analyzer process (`binary model`), driven line by line.
///
/// The child's stdout and stderr are drained by reader threads into a
/// channel, so every wait for the prompt is bounded.
pub struct ProcessAnalyzer {
    child: Child,
    stdin: Option<ChildStdin>,
    output: Receiver<Vec<u8>>,
    pending: Vec<u8>,
    prompt: Vec<u8>,
    query_timeout: Duration,
    /// Requests that timed out before their prompt was read.
    owed_prompts: usize,
}

impl ProcessAnalyzer {
    /// Spawn the analyzer and wait for its first prompt.
    pub fn start(
        binary: &str,
        model: &Path,
        options: &AnalyzerOptions,
    ) -> Result<Self, AnalyzerError> {
        let _span = debug_span!("analyzer_start", binary).entered();
        let mut child = Command::new(binary)
            .arg(model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| AnalyzerError::Spawn {
                binary: binary.to_string(),
                source,
            })?;

        let (tx, rx) = mpsc::channel();
        if let Some(stdout) = child.stdout.take() {
            spawn_reader(stdout, tx.clone(), "analyzer-stdout")?;
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_reader(stderr, tx, "analyzer-stderr")?;
        }

        let mut analyzer = Self {
            stdin: child.stdin.take(),
            child,
            output: rx,
            pending: Vec::new(),
            prompt: options.prompt.as_bytes().to_vec(),
            query_timeout: options.query_timeout,
            owed_prompts: 0,
        };

        match analyzer.read_until_prompt(options.startup_timeout) {
            Ok(banner) => {
                debug!(banner = %String::from_utf8_lossy(&banner).trim(), "analyzer ready");
                Ok(analyzer)
            }
            Err(AnalyzerError::Timeout(timeout)) => {
                let output = analyzer.take_pending();
                analyzer.close();
                Err(AnalyzerError::StartupTimeout { timeout, output })
            }
            Err(_) => {
                let output = analyzer.take_pending();
                analyzer.close();
                Err(AnalyzerError::Startup { output })
            }
        }
    }

    /// Accumulate output until the prompt shows up; return what preceded it.
    fn read_until_prompt(&mut self, timeout: Duration) -> Result<Vec<u8>, AnalyzerError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(pos) = find(&self.pending, &self.prompt) {
                let response = self.pending[..pos].to_vec();
                self.pending.drain(..pos + self.prompt.len());
                return Ok(response);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(AnalyzerError::Timeout(timeout));
            }
            match self.output.recv_timeout(remaining) {
                Ok(chunk) => self.pending.extend_from_slice(&chunk),
                Err(RecvTimeoutError::Timeout) => return Err(AnalyzerError::Timeout(timeout)),
                Err(RecvTimeoutError::Disconnected) => return Err(AnalyzerError::Closed),
            }
        }
    }

    /// Read and drop the responses of earlier requests that timed out, so the
    /// next prompt belongs to the next request.
    fn settle_owed(&mut self) -> Result<(), AnalyzerError> {
        while self.owed_prompts > 0 {
            self.read_until_prompt(self.query_timeout)?;
            self.owed_prompts -= 1;
            debug!(remaining = self.owed_prompts, "late analyzer response dropped");
        }
        Ok(())
    }

    fn take_pending(&mut self) -> String {
        while let Ok(chunk) = self.output.try_recv() {
            self.pending.extend_from_slice(&chunk);
        }
        let output = String::from_utf8_lossy(&self.pending).trim().to_string();
        self.pending.clear();
        output
    }

    fn send_line(&mut self, word: &str) -> io::Result<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| io::Error::new(ErrorKind::BrokenPipe, "analyzer stdin closed"))?;
        stdin.write_all(word.as_bytes())?;
        stdin.write_all(b"\n")?;
        stdin.flush()
    }
}

impl Analyzer for ProcessAnalyzer {
    fn query(&mut self, word: &str) -> Result<Vec<String>, AnalyzerError> {
        if self.stdin.is_none() {
            return Err(AnalyzerError::Closed);
        }
        if let Err(e) = self.settle_owed() {
            if matches!(e, AnalyzerError::Closed) {
                self.stdin = None;
            }
            return Err(e);
        }
        if let Err(e) = self.send_line(word) {
            debug!(error = %e, "analyzer stdin write failed");
            self.stdin = None;
            return Err(AnalyzerError::Closed);
        }
        match self.read_until_prompt(self.query_timeout) {
            Ok(raw) => Ok(frame_response(&String::from_utf8_lossy(&raw), word)),
            Err(AnalyzerError::Closed) => {
                self.stdin = None;
                Err(AnalyzerError::Closed)
            }
            Err(AnalyzerError::Timeout(timeout)) => {
                self.owed_prompts += 1;
                Err(AnalyzerError::Timeout(timeout))
            }
            Err(e) => Err(e),
        }
    }

    fn close(&mut self) {
        if let Some(mut stdin) = self.stdin.take() {
            let _ = stdin.write_all(b"q\n");
            let _ = stdin.flush();
        }
        match self.child.try_wait() {
            Ok(Some(_)) => {}
            Ok(None) => {
                if let Err(e) = self.child.kill() {
                    warn!(error = %e, "failed to kill analyzer process");
                }
                let _ = self.child.wait();
            }
            Err(e) => warn!(error = %e, "failed to poll analyzer process"),
        }
    }
}

impl Drop for ProcessAnalyzer {
    fn drop(&mut self) {
        self.close();
    }
}

fn spawn_reader<R: Read + Send + 'static>(
    mut source: R,
    tx: Sender<Vec<u8>>,
    name: &str,
) -> io::Result<()> {
    thread::Builder::new().name(name.into()).spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
    })?;
    Ok(())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
