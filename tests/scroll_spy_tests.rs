use std::collections::HashMap;
use std::time::Duration;

use budget_pulse::scroll_spy::{
    group_transactions, Direction, FrameHandle, ScrollHost, ScrollSpy, ScrollSpyConfig,
    SectionLayout, TimerHandle, TrackerPhase,
};
use pulse_domain::Transaction;
use uuid::Uuid;

mod common;
use common::date;

#[derive(Default)]
struct FakeHost {
    next: u64,
    listening: bool,
    timers: Vec<TimerHandle>,
}

impl ScrollHost for FakeHost {
    fn attach_scroll_listener(&mut self) {
        self.listening = true;
    }

    fn detach_scroll_listener(&mut self) {
        self.listening = false;
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        FrameHandle(self.next)
    }

    fn cancel_frame(&mut self, _handle: FrameHandle) {}

    fn set_timeout(&mut self, _delay: Duration) -> TimerHandle {
        self.next += 1;
        let handle = TimerHandle(self.next);
        self.timers.push(handle);
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timers.retain(|timer| *timer != handle);
    }
}

/// Sections stacked 100px apart in document order.
struct ListLayout {
    positions: HashMap<String, f64>,
    scroll: f64,
}

impl SectionLayout for ListLayout {
    fn section_top(&self, id: &str) -> Option<f64> {
        self.positions.get(id).map(|position| position - self.scroll)
    }
}

#[test]
fn scrolling_a_grouped_list_walks_months_and_dates() {
    let category = Uuid::new_v4();
    let transactions = vec![
        Transaction::expense(category, 1_000, date(2025, 8, 2)).unwrap(),
        Transaction::expense(category, 2_000, date(2025, 8, 1)).unwrap(),
        Transaction::expense(category, 3_000, date(2025, 7, 31)).unwrap(),
    ];
    let sections = group_transactions(&transactions);
    // month-08, date-08-02, date-08-01, month-07, date-07-31
    let positions: HashMap<String, f64> = sections
        .iter()
        .enumerate()
        .map(|(idx, section)| (section.id.clone(), idx as f64 * 100.0))
        .collect();

    let config = ScrollSpyConfig {
        threshold: 50.0,
        settle_delay: Duration::from_millis(300),
    };
    let mut spy = ScrollSpy::new(FakeHost::default(), config);
    for section in sections {
        spy.register(section);
    }
    let mut layout = ListLayout {
        positions,
        scroll: 0.0,
    };
    spy.refresh(&layout);
    assert_eq!(spy.active_month().unwrap().id, "month-2025-08");
    assert_eq!(spy.active_date(), None);

    layout.scroll = 120.0;
    spy.on_scroll(layout.scroll);
    spy.on_scroll(layout.scroll);
    assert_eq!(spy.phase(), TrackerPhase::Tracking);
    let transition = spy.on_frame(&layout);
    // First date selection is not a change.
    assert!(transition.is_none());
    assert_eq!(spy.active_date().unwrap().id, "date-2025-08-02");

    layout.scroll = 330.0;
    spy.on_scroll(layout.scroll);
    let transition = spy.on_frame(&layout).expect("month changed");
    assert_eq!(transition.direction, Direction::Down);
    assert!(transition.month_changed);
    assert!(transition.date_changed);
    assert_eq!(spy.active_month().unwrap().id, "month-2025-07");
    assert_eq!(spy.active_date().unwrap().id, "date-2025-08-01");

    let timer = spy.host().timers[0];
    spy.on_settle(timer);
    assert_eq!(spy.transition(), None);

    layout.scroll = 150.0;
    spy.on_scroll(layout.scroll);
    let transition = spy.on_frame(&layout).expect("scrolled back");
    assert_eq!(transition.direction, Direction::Up);
    assert_eq!(spy.active_month().unwrap().id, "month-2025-08");

    let pending_timer = *spy.host().timers.last().unwrap();
    spy.teardown();
    assert!(!spy.host().listening);
    assert!(!spy.host().timers.contains(&pending_timer));
    assert_eq!(spy.phase(), TrackerPhase::Detached);
}
