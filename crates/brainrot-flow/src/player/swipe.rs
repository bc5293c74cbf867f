//! Horizontal swipe detection.

/// Navigation a swipe asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved left: next video
    Forward,
    /// Finger moved right: previous video
    Backward,
}

impl SwipeDirection {
    /// Overlay text while the swipe is pending.
    pub fn hint(&self) -> &'static str {
        match self {
            SwipeDirection::Forward => "Next Video",
            SwipeDirection::Backward => "Previous Video",
        }
    }
}

/// Tracks one touch gesture at a time.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold_px: f64,
    start_x: Option<f64>,
    pending: Option<SwipeDirection>,
}

impl SwipeTracker {
    pub fn new(threshold_px: f64) -> Self {
        Self {
            threshold_px,
            start_x: None,
            pending: None,
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
        self.pending = None;
    }

    /// Update the pending direction from the current finger position.
    ///
    /// Displacement within the threshold clears it.
    pub fn touch_move(&mut self, x: f64) -> Option<SwipeDirection> {
        let start = self.start_x?;
        let displacement = start - x;
        self.pending = if displacement > self.threshold_px {
            Some(SwipeDirection::Forward)
        } else if displacement < -self.threshold_px {
            Some(SwipeDirection::Backward)
        } else {
            None
        };
        self.pending
    }

    /// Finish the gesture, returning the direction to apply if any.
    pub fn touch_end(&mut self) -> Option<SwipeDirection> {
        self.start_x = None;
        self.pending.take()
    }

    pub fn pending(&self) -> Option<SwipeDirection> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        let mut swipe = SwipeTracker::new(50.0);
        swipe.touch_start(200.0);
        assert_eq!(swipe.touch_move(150.0), None);
        assert_eq!(swipe.touch_move(149.0), Some(SwipeDirection::Forward));
        assert_eq!(swipe.touch_end(), Some(SwipeDirection::Forward));
        assert_eq!(swipe.touch_move(100.0), None);
    }

    #[test]
    fn test_backward_swipe() {
        let mut swipe = SwipeTracker::new(50.0);
        swipe.touch_start(100.0);
        swipe.touch_move(180.0);
        assert_eq!(swipe.pending().map(|d| d.hint()), Some("Previous Video"));
        assert_eq!(swipe.touch_end(), Some(SwipeDirection::Backward));
    }

    #[test]
    fn test_returning_within_threshold_cancels() {
        let mut swipe = SwipeTracker::new(50.0);
        swipe.touch_start(300.0);
        swipe.touch_move(200.0);
        swipe.touch_move(280.0);
        assert_eq!(swipe.touch_end(), None);
    }

    #[test]
    fn test_move_without_start_is_ignored() {
        let mut swipe = SwipeTracker::new(50.0);
        assert_eq!(swipe.touch_move(0.0), None);
        assert_eq!(swipe.touch_end(), None);
    }

    #[test]
    fn test_start_at_zero_is_tracked() {
        let mut swipe = SwipeTracker::new(50.0);
        swipe.touch_start(0.0);
        assert_eq!(swipe.touch_move(60.0), Some(SwipeDirection::Backward));
    }
}
