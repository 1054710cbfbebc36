use std::time::Duration;

/// Handle for a scheduled animation-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Handle for a scheduled one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Reads the live geometry of registered sections.
pub trait SectionLayout {
    /// Top edge of the section relative to the viewport, or `None` when the
    /// section is not currently laid out.
    fn section_top(&self, id: &str) -> Option<f64>;
}

/// Scheduling primitives of the environment hosting the scrolling view.
///
/// The host calls back into [`super::ScrollSpy::on_scroll`],
/// [`super::ScrollSpy::on_frame`] and [`super::ScrollSpy::on_settle`].
pub trait ScrollHost {
    fn attach_scroll_listener(&mut self);
    fn detach_scroll_listener(&mut self);
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle;
    fn clear_timeout(&mut self, handle: TimerHandle);
}

impl<T: SectionLayout + ?Sized> SectionLayout for &T {
    fn section_top(&self, id: &str) -> Option<f64> {
        (**self).section_top(id)
    }
}

impl SectionLayout for std::collections::HashMap<String, f64> {
    fn section_top(&self, id: &str) -> Option<f64> {
        self.get(id).copied()
    }
}
