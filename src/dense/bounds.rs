//! Active-region bounding box for the dense grid.

/// Inclusive rectangle `[min_x, max_x] x [min_y, max_y]`.
///
/// The empty box is stored inverted (`min > max`) so that the first
/// [`Bounds::include`] collapses it onto a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: usize,
    pub max_x: usize,
    pub min_y: usize,
    pub max_y: usize,
}

impl Bounds {
    /// The empty box for a `width x height` grid.
    #[inline]
    pub const fn inverted(width: usize, height: usize) -> Self {
        Self {
            min_x: width,
            max_x: 0,
            min_y: height,
            max_y: 0,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    #[inline(always)]
    pub fn include(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    #[inline]
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Whether `other` lies entirely inside `self`. The empty box is inside
    /// everything.
    #[inline]
    pub const fn covers(&self, other: &Bounds) -> bool {
        other.is_empty()
            || (!self.is_empty()
                && other.min_x >= self.min_x
                && other.max_x <= self.max_x
                && other.min_y >= self.min_y
                && other.max_y <= self.max_y)
    }

    /// Grow by one cell on every side, clamped to the grid. `None` when empty.
    #[inline]
    pub fn dilated(&self, width: usize, height: usize) -> Option<Bounds> {
        if self.is_empty() {
            return None;
        }
        Some(Bounds {
            min_x: self.min_x.saturating_sub(1),
            max_x: (self.max_x + 1).min(width - 1),
            min_y: self.min_y.saturating_sub(1),
            max_y: (self.max_y + 1).min(height - 1),
        })
    }

    /// Number of cells covered.
    #[inline]
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.max_x - self.min_x + 1) * (self.max_y - self.min_y + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Bounds;

    #[test]
    fn inverted_box_is_empty_until_first_include() {
        let mut b = Bounds::inverted(10, 8);
        assert!(b.is_empty());
        assert_eq!(b.area(), 0);
        b.include(3, 4);
        assert!(!b.is_empty());
        assert_eq!(
            b,
            Bounds {
                min_x: 3,
                max_x: 3,
                min_y: 4,
                max_y: 4
            }
        );
        assert_eq!(b.area(), 1);
    }

    #[test]
    fn single_cell_at_origin_is_not_empty() {
        let mut b = Bounds::inverted(1, 1);
        assert!(b.is_empty());
        b.include(0, 0);
        assert!(!b.is_empty());
        assert!(b.contains(0, 0));
    }

    #[test]
    fn dilation_clamps_to_grid_edges() {
        let mut b = Bounds::inverted(5, 5);
        b.include(0, 4);
        b.include(2, 3);
        let d = b.dilated(5, 5).unwrap();
        assert_eq!(
            d,
            Bounds {
                min_x: 0,
                max_x: 3,
                min_y: 2,
                max_y: 4
            }
        );
        assert_eq!(Bounds::inverted(5, 5).dilated(5, 5), None);
    }

    #[test]
    fn covers_handles_empty_boxes() {
        let empty = Bounds::inverted(4, 4);
        let mut b = Bounds::inverted(4, 4);
        b.include(1, 1);
        b.include(2, 2);
        assert!(b.covers(&empty));
        assert!(!empty.covers(&b));
        assert!(empty.covers(&empty));

        let mut inner = Bounds::inverted(4, 4);
        inner.include(2, 1);
        assert!(b.covers(&inner));
        inner.include(3, 3);
        assert!(!b.covers(&inner));
    }
}
