/// Index over the home screen's hero slides, wrapping at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn current(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn advance(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn retreat(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Jump to a slide indicator; out-of-range indices are ignored.
    pub fn jump(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_to_first_slide() {
        let mut carousel = Carousel::new(3);
        carousel.advance();
        carousel.advance();
        assert_eq!(carousel.current(), 2);
        carousel.advance();
        assert_eq!(carousel.current(), 0);
    }

    #[test]
    fn retreat_wraps_to_last_slide() {
        let mut carousel = Carousel::new(4);
        carousel.retreat();
        assert_eq!(carousel.current(), 3);
    }

    #[test]
    fn jump_ignores_out_of_range() {
        let mut carousel = Carousel::new(2);
        assert!(carousel.jump(1));
        assert!(!carousel.jump(2));
        assert_eq!(carousel.current(), 1);
    }

    #[test]
    fn empty_carousel_stays_put() {
        let mut carousel = Carousel::new(0);
        carousel.advance();
        carousel.retreat();
        assert_eq!(carousel.current(), 0);
        assert!(carousel.is_empty());
    }
}
