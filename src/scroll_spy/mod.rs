//! Tracks which month and date section sits at the top of a scrolling list.
//!
//! Scroll notifications are coalesced into one recompute per animation frame.
//! When the active month or date changes, a [`Transition`] is flagged with the
//! scroll direction and cleared again after the settle delay.

pub mod host;
pub mod sections;

use std::collections::HashMap;
use std::time::Duration;

use pulse_config::ScrollSpySettings;
use serde::{Deserialize, Serialize};

pub use host::{FrameHandle, ScrollHost, SectionLayout, TimerHandle};
pub use sections::{group_transactions, ScrollSpySection, SectionKind, SectionSummary};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSpyConfig {
    /// Viewport offset a section top must reach (or pass) to become active.
    pub threshold: f64,
    pub settle_delay: Duration,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self::from(&ScrollSpySettings::default())
    }
}

impl From<&ScrollSpySettings> for ScrollSpyConfig {
    fn from(settings: &ScrollSpySettings) -> Self {
        Self {
            threshold: settings.threshold_px,
            settle_delay: Duration::from_millis(settings.settle_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transition {
    pub direction: Direction,
    pub month_changed: bool,
    pub date_changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    Idle,
    /// A scroll arrived and a frame is pending.
    Tracking,
    Detached,
}

pub struct ScrollSpy<H: ScrollHost> {
    host: H,
    config: ScrollSpyConfig,
    sections: HashMap<String, ScrollSpySection>,
    active_month: Option<String>,
    active_date: Option<String>,
    transition: Option<Transition>,
    pending_frame: Option<FrameHandle>,
    settle_timer: Option<TimerHandle>,
    latest_offset: f64,
    computed_offset: f64,
    attached: bool,
}

impl<H: ScrollHost> ScrollSpy<H> {
    pub fn new(mut host: H, config: ScrollSpyConfig) -> Self {
        host.attach_scroll_listener();
        Self {
            host,
            config,
            sections: HashMap::new(),
            active_month: None,
            active_date: None,
            transition: None,
            pending_frame: None,
            settle_timer: None,
            latest_offset: 0.0,
            computed_offset: 0.0,
            attached: true,
        }
    }

    pub fn register(&mut self, section: ScrollSpySection) {
        self.sections.insert(section.id.clone(), section);
    }

    /// Drops a section. An active id stays recorded (though no longer
    /// returned) so the next frame reports the header change.
    pub fn unregister(&mut self, id: &str) -> Option<ScrollSpySection> {
        self.sections.remove(id)
    }

    pub fn section(&self, id: &str) -> Option<&ScrollSpySection> {
        self.sections.get(id)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn active_month(&self) -> Option<&ScrollSpySection> {
        self.active_month.as_deref().and_then(|id| self.sections.get(id))
    }

    pub fn active_date(&self) -> Option<&ScrollSpySection> {
        self.active_date.as_deref().and_then(|id| self.sections.get(id))
    }

    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    pub fn phase(&self) -> TrackerPhase {
        if !self.attached {
            TrackerPhase::Detached
        } else if self.pending_frame.is_some() {
            TrackerPhase::Tracking
        } else {
            TrackerPhase::Idle
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Records a scroll notification. At most one frame is requested until it runs.
    pub fn on_scroll(&mut self, offset: f64) {
        if !self.attached {
            return;
        }
        self.latest_offset = offset;
        if self.pending_frame.is_none() {
            self.pending_frame = Some(self.host.request_frame());
        }
    }

    /// Runs the coalesced recompute. Frames that were not requested (or were
    /// cancelled by teardown) are ignored.
    pub fn on_frame(&mut self, layout: &impl SectionLayout) -> Option<Transition> {
        self.pending_frame.take()?;

        let (month, date) = self.select(layout);
        let month_changed = self.active_month.is_some() && month != self.active_month;
        let date_changed = self.active_date.is_some() && date != self.active_date;
        let direction = if self.latest_offset < self.computed_offset {
            Direction::Up
        } else {
            Direction::Down
        };

        self.active_month = month;
        self.active_date = date;
        self.computed_offset = self.latest_offset;

        if !(month_changed || date_changed) {
            return None;
        }
        let transition = Transition {
            direction,
            month_changed,
            date_changed,
        };
        tracing::trace!(?transition, "scroll section changed");
        self.transition = Some(transition);
        if let Some(timer) = self.settle_timer.take() {
            self.host.clear_timeout(timer);
        }
        self.settle_timer = Some(self.host.set_timeout(self.config.settle_delay));
        Some(transition)
    }

    /// Recomputes synchronously without flagging a transition (initial mount,
    /// sections replaced).
    pub fn refresh(&mut self, layout: &impl SectionLayout) {
        let (month, date) = self.select(layout);
        self.active_month = month;
        self.active_date = date;
        self.computed_offset = self.latest_offset;
    }

    /// Clears the transition once its settle timer fires.
    pub fn on_settle(&mut self, timer: TimerHandle) {
        if self.settle_timer == Some(timer) {
            self.settle_timer = None;
            self.transition = None;
        }
    }

    /// Detaches from the host and cancels pending callbacks. Safe to call twice.
    pub fn teardown(&mut self) {
        if self.attached {
            self.host.detach_scroll_listener();
            self.attached = false;
        }
        if let Some(frame) = self.pending_frame.take() {
            self.host.cancel_frame(frame);
        }
        if let Some(timer) = self.settle_timer.take() {
            self.host.clear_timeout(timer);
        }
        self.transition = None;
    }

    fn select(&self, layout: &impl SectionLayout) -> (Option<String>, Option<String>) {
        (
            self.nearest(layout, SectionKind::Month),
            self.nearest(layout, SectionKind::Date),
        )
    }

    /// The section of `kind` whose top is at or above the threshold and
    /// closest to it.
    fn nearest(&self, layout: &impl SectionLayout, kind: SectionKind) -> Option<String> {
        self.sections
            .values()
            .filter(|section| section.kind == kind)
            .filter_map(|section| layout.section_top(&section.id).map(|top| (top, section)))
            .filter(|(top, _)| *top <= self.config.threshold)
            .max_by(|(a_top, a), (b_top, b)| {
                a_top
                    .total_cmp(b_top)
                    .then_with(|| b.id.cmp(&a.id))
            })
            .map(|(_, section)| section.id.clone())
    }
}

impl<H: ScrollHost> Drop for ScrollSpy<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
