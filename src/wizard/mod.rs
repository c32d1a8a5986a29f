//! Step wizard for the onboarding guide
//!
//! Bounds-safe sequential navigation over a step list, independent of where
//! the steps came from (server content or the baked-in defaults).

use crate::client::models::{GuideContent, GuideStep};

/// Minimum number of steps a server-provided guide must carry before it is
/// preferred over the baked-in defaults
pub const MIN_GUIDE_STEPS: usize = 5;

/// Navigation state over a fixed step list
///
/// `current` stays clamped to `[1, total]`; out-of-range requests are
/// no-ops. Reaching the last step relabels "next" but never locks
/// navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSession {
    current: usize,
    total: usize,
}

impl WizardSession {
    /// Start a session at step 1. A session over an empty list still has
    /// one (empty) position so callers never index below 1.
    pub fn new(total: usize) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Advance one step; no-op on the last step. Returns whether the
    /// position changed, so callers re-render only on change.
    pub fn next(&mut self) -> bool {
        if self.current < self.total {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Go back one step; no-op on the first step
    pub fn prev(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to step `n`; no-op when out of range or already there
    pub fn go_to(&mut self, n: usize) -> bool {
        if n >= 1 && n <= self.total && n != self.current {
            self.current = n;
            true
        } else {
            false
        }
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total
    }

    /// Progress label, e.g. "Step 3 of 6"
    pub fn progress(&self) -> String {
        format!("Step {} of {}", self.current, self.total)
    }
}

/// The baked-in guide shown when the server content is unavailable or
/// incomplete. Kept in lockstep with the server's seed content.
pub fn default_guide_steps() -> Vec<GuideStep> {
    let steps = [
        (
            "Welcome to SSH Guardian",
            "What this dashboard does",
            "SSH Guardian watches authentication logs on your hosts, scores \
             login attempts with a trained model, and blocks attackers at the \
             firewall before they get a foothold.",
            None,
        ),
        (
            "Install the agent",
            "One agent per monitored host",
            "Install the guardian-agent package on each host you want \
             monitored and point it at this server. The agent ships auth \
             events only; it never sends credentials.",
            Some("The agent starts in monitor-only mode. Nothing is blocked yet."),
        ),
        (
            "Review incoming events",
            "Notifications and history",
            "As events arrive they appear in the notification history, \
             categorized as security, blocking, or system messages. Use the \
             category tabs to focus on what matters.",
            None,
        ),
        (
            "Train the detection model",
            "ML training status",
            "Once a few days of events have accumulated, start a training \
             run. The training page shows progress and accuracy of the \
             resulting model.",
            Some("Retrain after major changes to your fleet or user base."),
        ),
        (
            "Enable automatic blocking",
            "Firewall rules",
            "Flip the firewall to enforcing mode to let Guardian insert \
             block rules for flagged sources. Every rule is listed on the \
             firewall page and can be lifted manually.",
            Some("Keep an allow rule for your own management addresses."),
        ),
    ];

    steps
        .into_iter()
        .enumerate()
        .map(|(i, (title, subtitle, content, tip))| GuideStep {
            step_number: (i + 1) as u32,
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            content: content.to_string(),
            tip: tip.map(str::to_string),
        })
        .collect()
}

/// Default guide content used as the loader fallback
pub fn default_guide_content() -> GuideContent {
    let steps = default_guide_steps();
    let total = steps.len() as u32;
    GuideContent {
        steps,
        total_steps: Some(total),
    }
}

/// Server guide content is usable only when it carries at least the
/// expected number of steps; anything thinner falls back to defaults.
pub fn guide_is_complete(guide: &GuideContent) -> bool {
    guide.steps.len() >= MIN_GUIDE_STEPS
}

/// Steps to render: the server's when the guide is complete, otherwise
/// the baked-in defaults
pub fn steps_or_default(guide: GuideContent) -> Vec<GuideStep> {
    if guide_is_complete(&guide) {
        guide.steps
    } else {
        default_guide_steps()
    }
}
