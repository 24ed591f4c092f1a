use conda_minify::prelude::*;
use std::sync::{Arc, Mutex};

/// One call received by the mock reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Message(String),
    Progress { current: usize, total: usize },
    Warning(String),
    Completed(String),
}

/// Mock ProgressReporter recording every call
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::Warning(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Last `(current, total)` pair seen by `report_progress`
    pub fn last_progress(&self) -> Option<(usize, usize)> {
        self.events().into_iter().rev().find_map(|event| match event {
            ProgressEvent::Progress { current, total } => Some((current, total)),
            _ => None,
        })
    }

    fn push(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.push(ProgressEvent::Message(message.to_string()));
    }

    fn report_progress(&self, current: usize, total: usize, _message: Option<&str>) {
        self.push(ProgressEvent::Progress { current, total });
    }

    fn report_error(&self, message: &str) {
        self.push(ProgressEvent::Warning(message.to_string()));
    }

    fn report_completion(&self, message: &str) {
        self.push(ProgressEvent::Completed(message.to_string()));
    }
}
