//! Cache status indicator
//!
//! Surfaces hit/miss/loading/error state and latency for each content
//! feature. Reporters hold no decision logic; the loader tells them what
//! happened and they render it.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use colored::Colorize;

/// The four mutually exclusive indicator states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indicator {
    Loading,
    Cached,
    Fresh,
    Error(String),
}

/// Receives fetch outcomes from the loader
pub trait StatusReporter: Send + Sync {
    /// Mark the feature as loading
    fn set_loading(&self, feature: &str);

    /// Mark the feature as served from cache or freshly fetched,
    /// with the measured fetch time for fresh loads
    fn update(&self, feature: &str, from_cache: bool, elapsed: Option<Duration>);

    /// Mark the feature as failed with a message
    fn set_error(&self, feature: &str, message: &str);
}

/// Terminal status reporter
///
/// Writes one-line indicators to stderr so stdout stays clean for content
/// and JSON output. Repeating a transition the indicator is already in is
/// a no-op, so callers may report the same state twice without double
/// output.
pub struct TermReporter {
    last: Mutex<HashMap<String, Indicator>>,
}

impl TermReporter {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(HashMap::new()),
        }
    }

    /// Record the transition; returns false when it is a repeat
    fn transition(&self, feature: &str, state: Indicator) -> bool {
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if last.get(feature) == Some(&state) {
            return false;
        }
        last.insert(feature.to_string(), state);
        true
    }
}

impl Default for TermReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusReporter for TermReporter {
    fn set_loading(&self, feature: &str) {
        if self.transition(feature, Indicator::Loading) {
            eprintln!("{} loading {}...", "⟳".cyan(), feature);
        }
    }

    fn update(&self, feature: &str, from_cache: bool, elapsed: Option<Duration>) {
        let state = if from_cache {
            Indicator::Cached
        } else {
            Indicator::Fresh
        };
        if !self.transition(feature, state) {
            return;
        }

        if from_cache {
            eprintln!("{} {} (cached)", "✓".green(), feature);
        } else {
            match elapsed {
                Some(d) => eprintln!("{} {} (fresh, {}ms)", "✓".green(), feature, d.as_millis()),
                None => eprintln!("{} {} (fresh)", "✓".green(), feature),
            }
        }
    }

    fn set_error(&self, feature: &str, message: &str) {
        if self.transition(feature, Indicator::Error(message.to_string())) {
            eprintln!("{} {}: {}", "✗".red(), feature, message);
        }
    }
}

impl StatusReporter for Box<dyn StatusReporter> {
    fn set_loading(&self, feature: &str) {
        (**self).set_loading(feature)
    }

    fn update(&self, feature: &str, from_cache: bool, elapsed: Option<Duration>) {
        (**self).update(feature, from_cache, elapsed)
    }

    fn set_error(&self, feature: &str, message: &str) {
        (**self).set_error(feature, message)
    }
}

/// Reporter that discards everything, for JSON output and scripting
pub struct SilentReporter;

impl StatusReporter for SilentReporter {
    fn set_loading(&self, _feature: &str) {}
    fn update(&self, _feature: &str, _from_cache: bool, _elapsed: Option<Duration>) {}
    fn set_error(&self, _feature: &str, _message: &str) {}
}

/// Records every transition for test assertions
#[cfg(test)]
pub struct RecordingReporter {
    pub events: Mutex<Vec<(String, Indicator)>>,
}

#[cfg(test)]
impl RecordingReporter {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<(String, Indicator)> {
        self.events.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl StatusReporter for RecordingReporter {
    fn set_loading(&self, feature: &str) {
        self.events
            .lock()
            .unwrap()
            .push((feature.to_string(), Indicator::Loading));
    }

    fn update(&self, feature: &str, from_cache: bool, _elapsed: Option<Duration>) {
        let state = if from_cache {
            Indicator::Cached
        } else {
            Indicator::Fresh
        };
        self.events.lock().unwrap().push((feature.to_string(), state));
    }

    fn set_error(&self, feature: &str, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push((feature.to_string(), Indicator::Error(message.to_string())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_reporter_transitions_are_idempotent() {
        let reporter = TermReporter::new();

        assert!(reporter.transition("guide", Indicator::Loading));
        assert!(!reporter.transition("guide", Indicator::Loading));
        assert!(reporter.transition("guide", Indicator::Fresh));
        assert!(!reporter.transition("guide", Indicator::Fresh));
    }

    #[test]
    fn test_term_reporter_tracks_features_independently() {
        let reporter = TermReporter::new();

        assert!(reporter.transition("guide", Indicator::Loading));
        assert!(reporter.transition("report", Indicator::Loading));
        assert!(!reporter.transition("guide", Indicator::Loading));
    }

    #[test]
    fn test_error_with_new_message_is_a_new_state() {
        let reporter = TermReporter::new();

        assert!(reporter.transition("guide", Indicator::Error("timeout".into())));
        assert!(!reporter.transition("guide", Indicator::Error("timeout".into())));
        assert!(reporter.transition("guide", Indicator::Error("refused".into())));
    }
}
