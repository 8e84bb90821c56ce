use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use super::{Analyzer, AnalyzerError};

/// Words sent to a `ScriptedAnalyzer`, in order.
pub type QueryLog = Rc<RefCell<Vec<String>>>;

enum Reply {
    Lines(Vec<String>),
    Timeout,
    Closed,
}

/// In-memory analyzer with canned answers, for tests and dry runs.
///
/// Unknown words get no analyses.
#[derive(Default)]
pub struct ScriptedAnalyzer {
    replies: HashMap<String, Reply>,
    log: QueryLog,
    closed: bool,
}

impl ScriptedAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `word` with these raw analysis lines.
    pub fn with_analyses<I, S>(mut self, word: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines.into_iter().map(Into::into).collect();
        self.replies.insert(word.to_string(), Reply::Lines(lines));
        self
    }

    /// Never answer `word` in time.
    pub fn with_timeout(mut self, word: &str) -> Self {
        self.replies.insert(word.to_string(), Reply::Timeout);
        self
    }

    /// Crash while answering `word`; later queries fail too.
    pub fn with_crash(mut self, word: &str) -> Self {
        self.replies.insert(word.to_string(), Reply::Closed);
        self
    }

    /// Shared handle to the words queried so far.
    pub fn query_log(&self) -> QueryLog {
        Rc::clone(&self.log)
    }
}

impl Analyzer for ScriptedAnalyzer {
    fn query(&mut self, word: &str) -> Result<Vec<String>, AnalyzerError> {
        if self.closed {
            return Err(AnalyzerError::Closed);
        }
        self.log.borrow_mut().push(word.to_string());
        match self.replies.get(word) {
            Some(Reply::Lines(lines)) => Ok(lines.clone()),
            Some(Reply::Timeout) => Err(AnalyzerError::Timeout(Duration::ZERO)),
            Some(Reply::Closed) => {
                self.closed = true;
                Err(AnalyzerError::Closed)
            }
            None => Ok(Vec::new()),
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
