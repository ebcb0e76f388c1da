use std::collections::BTreeMap;
use std::sync::Mutex;

use cortex_action::action::{ActionLog, OutputSink, SecretMasker};
use cortex_action::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Info(String),
    Error(String),
    Failed(String),
}

impl LogLine {
    pub fn text(&self) -> &str {
        match self {
            LogLine::Info(s) | LogLine::Error(s) | LogLine::Failed(s) => s,
        }
    }
}

/// An `ActionLog` that keeps every (masked) line in memory.
#[derive(Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<LogLine>>,
    masker: Mutex<SecretMasker>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|l| match l {
                LogLine::Info(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|l| match l {
                LogLine::Error(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|l| match l {
                LogLine::Failed(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    /// Every recorded line joined with newlines.
    pub fn text(&self) -> String {
        self.lines()
            .iter()
            .map(LogLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn secret_count(&self) -> usize {
        self.masker.lock().unwrap().secret_count()
    }

    fn push(&self, line: LogLine) {
        self.lines.lock().unwrap().push(line);
    }
}

impl ActionLog for RecordingLog {
    fn register_secret(&self, secret: &str) {
        self.masker.lock().unwrap().add_secret(secret);
    }

    fn mask(&self, text: &str) -> String {
        self.masker.lock().unwrap().mask(text)
    }

    fn info(&self, message: &str) {
        self.push(LogLine::Info(self.mask(message)));
    }

    fn error(&self, message: &str) {
        self.push(LogLine::Error(self.mask(message)));
    }

    fn set_failed(&self, message: &str) {
        self.push(LogLine::Failed(self.mask(message)));
    }
}

/// Outputs kept in a map; later writes to the same name win.
#[derive(Debug, Default)]
pub struct MemoryOutputs {
    pub values: BTreeMap<String, String>,
    pub writes: usize,
}

impl MemoryOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

impl OutputSink for MemoryOutputs {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        self.values.insert(name.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
