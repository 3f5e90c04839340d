// Featured carousel position

use serde::Serialize;
use std::time::{Duration, Instant};

pub const AUTO_ADVANCE_EVERY: Duration = Duration::from_secs(4);
pub const RESUME_AFTER: Duration = Duration::from_secs(10);

const MOBILE_WIDTH: u32 = 768;
const DESKTOP_WIDTH: u32 = 1024;

// Cards visible at once for a viewport width in pixels
pub fn cards_to_show(viewport_width: u32) -> usize {
    if viewport_width < MOBILE_WIDTH {
        1
    } else if viewport_width < DESKTOP_WIDTH {
        2
    } else {
        3
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselView {
    pub index: usize,
    pub max_index: usize,
    pub cards_to_show: usize,
    pub auto_playing: bool,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    visible: usize,
    index: usize,
    // Set while auto-play is paused after manual navigation
    paused_until: Option<Instant>,
    last_advance: Instant,
}

impl Carousel {
    pub fn new(len: usize, visible: usize, now: Instant) -> Self {
        Carousel {
            len,
            visible: visible.max(1),
            index: 0,
            paused_until: None,
            last_advance: now,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn max_index(&self) -> usize {
        self.len.saturating_sub(self.visible)
    }

    pub fn is_auto_playing(&self, now: Instant) -> bool {
        self.paused_until.is_none_or(|until| now >= until)
    }

    // Viewport changed; keep the index within the new bound
    pub fn resize(&mut self, visible: usize) {
        self.visible = visible.max(1);
        self.index = self.index.min(self.max_index());
    }

    fn step_forward(&mut self) {
        self.index = if self.index >= self.max_index() { 0 } else { self.index + 1 };
    }

    fn pause(&mut self, now: Instant) {
        self.paused_until = Some(now + RESUME_AFTER);
        self.last_advance = now;
    }

    pub fn next(&mut self, now: Instant) {
        self.pause(now);
        self.step_forward();
    }

    pub fn prev(&mut self, now: Instant) {
        self.pause(now);
        self.index = if self.index == 0 { self.max_index() } else { self.index - 1 };
    }

    pub fn go_to(&mut self, index: usize, now: Instant) {
        self.pause(now);
        self.index = index.min(self.max_index());
    }

    // Advances once per elapsed interval while auto-playing; returns whether it moved
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(until) = self.paused_until {
            if now < until {
                return false;
            }
            self.paused_until = None;
            self.last_advance = until;
        }
        if now.duration_since(self.last_advance) < AUTO_ADVANCE_EVERY {
            return false;
        }
        self.step_forward();
        self.last_advance = now;
        true
    }

    pub fn view(&self, now: Instant) -> CarouselView {
        CarouselView {
            index: self.index,
            max_index: self.max_index(),
            cards_to_show: self.visible,
            auto_playing: self.is_auto_playing(now),
        }
    }
}
