//! Carousel navigation state machine
//!
//! One integer of state, `current_index` in `[0, total)`, moved by the two
//! navigation controls. Every transition's only observable effect is the
//! strip transform. There is no timer and no terminal state.

/// Class of the horizontally stacked strip the controller translates
pub const STRIP_CLASS: &str = "tm-carousel-inner";
/// Class of each item in the strip
pub const ITEM_CLASS: &str = "tm-carousel-item";
/// Class shared by both navigation buttons
pub const BUTTON_CLASS: &str = "tm-carousel-btn";

/// The two navigation affordances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavControl {
    /// Move to the previous item, wrapping to the last
    Prev,
    /// Move to the next item, wrapping to the first
    Next,
}

impl NavControl {
    /// Class identifying the control's button
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }

    /// Button glyph
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Prev => "\u{276E}",
            Self::Next => "\u{276F}",
        }
    }

    /// Accessible label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Prev => "Previous testimonial",
            Self::Next => "Next testimonial",
        }
    }
}

/// Carousel index state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselController {
    current_index: usize,
    total: usize,
}

impl CarouselController {
    /// Creates a controller at index 0.
    ///
    /// Returns `None` for an empty strip, which gets no working controls.
    #[must_use]
    pub const fn new(total: usize) -> Option<Self> {
        if total == 0 {
            None
        } else {
            Some(Self {
                current_index: 0,
                total,
            })
        }
    }

    /// Index of the item in view
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of items in the strip
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Advances one item, wrapping to the first
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> usize {
        self.current_index = (self.current_index + 1) % self.total;
        self.current_index
    }

    /// Goes back one item, wrapping to the last
    pub fn prev(&mut self) -> usize {
        self.current_index = (self.current_index + self.total - 1) % self.total;
        self.current_index
    }

    /// Applies a control press
    pub fn press(&mut self, control: NavControl) -> usize {
        match control {
            NavControl::Prev => self.prev(),
            NavControl::Next => self.next(),
        }
    }

    /// CSS transform bringing the current item into view
    #[must_use]
    pub fn transform(&self) -> String {
        format!("translateX(-{}%)", self.current_index * 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_controller() {
        assert!(CarouselController::new(0).is_none());
    }

    #[test]
    fn test_starts_at_zero() {
        let carousel = CarouselController::new(3).unwrap();
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.total(), 3);
        assert_eq!(carousel.transform(), "translateX(-0%)");
    }

    #[test]
    fn test_next_wraps() {
        let mut carousel = CarouselController::new(3).unwrap();
        assert_eq!(carousel.next(), 1);
        assert_eq!(carousel.next(), 2);
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.next(), 1);
        assert_eq!(carousel.transform(), "translateX(-100%)");
    }

    #[test]
    fn test_prev_wraps() {
        let mut carousel = CarouselController::new(3).unwrap();
        assert_eq!(carousel.prev(), 2);
        assert_eq!(carousel.transform(), "translateX(-200%)");
        assert_eq!(carousel.prev(), 1);
    }

    #[test]
    fn test_single_item_stays_put() {
        let mut carousel = CarouselController::new(1).unwrap();
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.prev(), 0);
    }

    #[test]
    fn test_press_dispatches() {
        let mut carousel = CarouselController::new(4).unwrap();
        carousel.press(NavControl::Next);
        carousel.press(NavControl::Next);
        carousel.press(NavControl::Prev);
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn test_nav_control_metadata() {
        assert_eq!(NavControl::Prev.class(), "prev");
        assert_eq!(NavControl::Next.class(), "next");
        assert_ne!(NavControl::Prev.glyph(), NavControl::Next.glyph());
        assert!(NavControl::Next.label().starts_with("Next"));
    }
}
