//! One-shot reveal: the first intersection marks an element, nothing undoes it.

use serde::{Deserialize, Serialize};

use crate::host::{ElementId, Host, TimerId};

/// Marker class added once an element has been revealed.
pub const REVEALED_CLASS: &str = "revealed";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealAnimation {
    #[default]
    FadeUp,
    SlideLeft,
    SlideRight,
    Scale,
}

impl RevealAnimation {
    /// Base class that carries the hidden state and transition.
    pub fn class(self) -> &'static str {
        match self {
            RevealAnimation::FadeUp => "scroll-reveal",
            RevealAnimation::SlideLeft => "scroll-reveal-left",
            RevealAnimation::SlideRight => "scroll-reveal-right",
            RevealAnimation::Scale => "scroll-reveal-scale",
        }
    }

    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "scroll-reveal" => Some(RevealAnimation::FadeUp),
            "scroll-reveal-left" => Some(RevealAnimation::SlideLeft),
            "scroll-reveal-right" => Some(RevealAnimation::SlideRight),
            "scroll-reveal-scale" => Some(RevealAnimation::Scale),
            _ => None,
        }
    }

    pub const ALL: [RevealAnimation; 4] = [
        RevealAnimation::FadeUp,
        RevealAnimation::SlideLeft,
        RevealAnimation::SlideRight,
        RevealAnimation::Scale,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    /// Observed, not yet seen.
    Watching,
    /// Seen; marker applied when the timer fires.
    Scheduled(TimerId),
    Revealed,
    /// Target went away before its delay elapsed.
    Dropped,
}

/// Reveal bookkeeping for one element.
#[derive(Clone, Debug)]
pub struct Reveal {
    pub element: ElementId,
    pub animation: RevealAnimation,
    pub delay_ms: u32,
    state: RevealState,
}

impl Reveal {
    pub fn new(element: ElementId, animation: RevealAnimation, delay_ms: u32) -> Self {
        Self {
            element,
            animation,
            delay_ms,
            state: RevealState::Watching,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    /// Handle an intersection report. Only the first intersecting report
    /// does anything: it stops observation and marks (or schedules).
    pub fn on_intersection(&mut self, intersecting: bool, reduced_motion: bool, host: &mut dyn Host) {
        if !intersecting || self.state != RevealState::Watching {
            return;
        }
        host.unobserve(self.element);

        if self.delay_ms == 0 || reduced_motion {
            self.mark(host);
        } else {
            self.state = RevealState::Scheduled(host.set_timeout(self.delay_ms));
        }
    }

    /// Handle a fired timer. Returns true if the timer belonged to this reveal.
    pub fn on_timeout(&mut self, id: TimerId, host: &mut dyn Host) -> bool {
        if self.state != RevealState::Scheduled(id) {
            return false;
        }
        if host.is_attached(self.element) {
            self.mark(host);
        } else {
            log::debug!("reveal target {:?} detached before its delay elapsed", self.element);
            self.state = RevealState::Dropped;
        }
        true
    }

    /// True while the element still needs an intersection report.
    pub fn is_watching(&self) -> bool {
        self.state == RevealState::Watching
    }

    /// Cancel a pending delay or observation during teardown. A cancelled
    /// delay goes back to `Watching` so a later mount can observe it again.
    pub fn cancel(&mut self, host: &mut dyn Host) {
        match self.state {
            RevealState::Watching => host.unobserve(self.element),
            RevealState::Scheduled(id) => {
                host.clear_timeout(id);
                self.state = RevealState::Watching;
            }
            RevealState::Revealed | RevealState::Dropped => {}
        }
    }

    fn mark(&mut self, host: &mut dyn Host) {
        host.add_class(self.element, REVEALED_CLASS);
        self.state = RevealState::Revealed;
    }
}
