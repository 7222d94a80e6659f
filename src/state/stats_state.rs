//! Count-up animation for the admin dashboard totals

use std::time::{Duration, Instant};

/// Duration of the count-up
pub const COUNT_UP_DURATION: Duration = Duration::from_millis(1000);

/// One animated counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counter {
    pub from: usize,
    pub to: usize,
    pub start_time: Option<Instant>,
}

impl Counter {
    /// Start counting from zero up to `to`
    pub fn animate_to(&mut self, to: usize, now: Instant) {
        self.from = 0;
        self.to = to;
        self.start_time = Some(now);
    }

    /// Value to display at `now`
    pub fn value_at(&self, now: Instant) -> usize {
        let Some(start) = self.start_time else {
            return self.to;
        };
        let elapsed = now.saturating_duration_since(start);
        let progress = (elapsed.as_secs_f32() / COUNT_UP_DURATION.as_secs_f32()).min(1.0);
        // Apply easing (cubic ease-out so the count settles gently)
        let eased = simple_easing::cubic_out(progress);
        let span = self.to.saturating_sub(self.from) as f32;
        self.from + (eased * span).floor() as usize
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.start_time
            .is_some_and(|start| now.saturating_duration_since(start) < COUNT_UP_DURATION)
    }
}

/// Totals shown in the admin header
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardStats {
    pub projects: Counter,
    pub users: Counter,
    pub forms: Counter,
}

impl DashboardStats {
    pub fn is_animating(&self, now: Instant) -> bool {
        self.projects.is_animating(now)
            || self.users.is_animating(now)
            || self.forms.is_animating(now)
    }
}
