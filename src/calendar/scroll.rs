//! Scroll-target arithmetic for the month pager and the day timeline, plus
//! the one-shot auto-scroll signal that drives "scroll to today".

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;

// ─── Offset arithmetic ────────────────────────────────────────────────────────

/// Offset of a month page in the vertically-paged year-of-months scroller:
/// one viewport height per month.
pub fn month_offset(month0: u32, viewport_height: f32) -> f32 {
    debug_assert!(month0 < 12, "month index out of range: {month0}");
    month0 as f32 * viewport_height
}

/// Offset of a wall-clock time within an hour-by-hour timeline.
/// `hour_height` is the rendered height of one hour at the current zoom.
pub fn time_of_day_offset(hour: u32, minute: u32, hour_height: f32) -> f32 {
    (hour * 60 + minute) as f32 / 60.0 * hour_height
}

/// Pulls `raw` back so the target lands `center_fraction` of the way down
/// the viewport instead of pinned to its top edge. Never negative.
pub fn center_offset(raw: f32, viewport_height: f32, center_fraction: f32) -> f32 {
    (raw - viewport_height * center_fraction).max(0.0)
}

/// Zoom factor bounds for the pinch/keyboard timeline zoom.
pub fn clamp_zoom(zoom: f32) -> f32 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

// ─── One-shot auto-scroll signal ──────────────────────────────────────────────

/// What an armed auto-scroll should land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollKind {
    /// First render of a view: jump without animation.
    Initial,
    /// "Today" button: animated scroll.
    Today,
}

/// Level-to-edge conversion for auto-scrolling.
///
/// A request arms the signal; the consumer acts on `pending()` and must call
/// `complete()` afterwards. Until the next request, further renders see
/// `None` and never re-trigger the scroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutoScroll {
    #[default]
    Idle,
    PendingInitial,
    PendingToday,
}

impl AutoScroll {
    pub fn request_initial(&mut self) {
        *self = AutoScroll::PendingInitial;
    }

    pub fn request_today(&mut self) {
        *self = AutoScroll::PendingToday;
    }

    pub fn pending(&self) -> Option<ScrollKind> {
        match self {
            AutoScroll::Idle => None,
            AutoScroll::PendingInitial => Some(ScrollKind::Initial),
            AutoScroll::PendingToday => Some(ScrollKind::Today),
        }
    }

    /// Acknowledge the scroll; the signal stays quiet until rearmed.
    pub fn complete(&mut self) {
        *self = AutoScroll::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_offset_is_one_page_per_month() {
        assert_eq!(month_offset(0, 40.0), 0.0);
        assert_eq!(month_offset(5, 40.0), 200.0);
        assert_eq!(month_offset(11, 24.0), 264.0);
    }

    #[test]
    fn test_time_of_day_offset_scales_with_hour_height() {
        assert_eq!(time_of_day_offset(9, 30, 4.0), 38.0);
        assert_eq!(time_of_day_offset(0, 0, 4.0), 0.0);
        assert_eq!(time_of_day_offset(23, 45, 2.0), 47.5);
        // Zoom doubles the hour height, and with it the offset.
        assert_eq!(time_of_day_offset(9, 30, 8.0), 76.0);
    }

    #[test]
    fn test_center_offset_clamps_at_zero() {
        assert_eq!(center_offset(100.0, 80.0, 0.25), 80.0);
        assert_eq!(center_offset(10.0, 80.0, 0.25), 0.0);
        assert_eq!(center_offset(0.0, 90.0, 0.5), 0.0);
    }

    #[test]
    fn test_zoom_bounds() {
        assert_eq!(clamp_zoom(0.1), MIN_ZOOM);
        assert_eq!(clamp_zoom(1.0), 1.0);
        assert_eq!(clamp_zoom(10.0), MAX_ZOOM);
    }

    #[test]
    fn test_auto_scroll_fires_once() {
        let mut signal = AutoScroll::default();
        assert_eq!(signal.pending(), None);

        signal.request_today();
        assert_eq!(signal.pending(), Some(ScrollKind::Today));
        // Still pending until the consumer acknowledges.
        assert_eq!(signal.pending(), Some(ScrollKind::Today));

        signal.complete();
        assert_eq!(signal.pending(), None);
        signal.complete();
        assert_eq!(signal.pending(), None);
    }

    #[test]
    fn test_today_request_overrides_initial() {
        let mut signal = AutoScroll::default();
        signal.request_initial();
        signal.request_today();
        assert_eq!(signal.pending(), Some(ScrollKind::Today));
        signal.complete();
        assert_eq!(signal.pending(), None);
    }
}
