//! Price range bounds.

/// Smallest price a bound may take. Prices are strictly positive.
pub const MIN_PRICE: f64 = f64::MIN_POSITIVE;

/// One endpoint of the selected range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    Lower,
    Upper,
}

impl Bound {
    /// The opposite endpoint.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Bound::Lower => Bound::Upper,
            Bound::Upper => Bound::Lower,
        }
    }

    /// Get the display name for this bound.
    pub fn name(&self) -> &'static str {
        match self {
            Bound::Lower => "lower",
            Bound::Upper => "upper",
        }
    }
}

/// An ordered price range.
///
/// Fields are private so that `lower <= upper` holds for every value of this
/// type; all constructors and setters preserve it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBounds {
    lower: f64,
    upper: f64,
}

impl RangeBounds {
    /// Create bounds from two endpoints in either order.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { lower: a, upper: b }
        } else {
            Self { lower: b, upper: a }
        }
    }

    /// Bounds at `price * lower_factor` and `price * upper_factor`.
    #[must_use]
    pub fn around(price: f64, lower_factor: f64, upper_factor: f64) -> Self {
        Self::new(price * lower_factor, price * upper_factor)
    }

    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Value of the given endpoint.
    #[inline]
    pub fn get(&self, bound: Bound) -> f64 {
        match bound {
            Bound::Lower => self.lower,
            Bound::Upper => self.upper,
        }
    }

    /// Replace one endpoint, clamping it against the other endpoint's exact value.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_clamped(&mut self, bound: Bound, value: f64) -> bool {
        let next = match bound {
            Bound::Lower => value.min(self.upper),
            Bound::Upper => value.max(self.lower),
        };
        let slot = match bound {
            Bound::Lower => &mut self.lower,
            Bound::Upper => &mut self.upper,
        };
        if *slot == next {
            return false;
        }
        *slot = next;
        true
    }

    /// Check if a price falls inside the closed range.
    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.lower && price <= self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_endpoints() {
        let bounds = RangeBounds::new(120.0, 80.0);
        assert_eq!(bounds.lower(), 80.0);
        assert_eq!(bounds.upper(), 120.0);
    }

    #[test]
    fn test_around_is_exact() {
        let price = 1834.27;
        let bounds = RangeBounds::around(price, 0.95, 1.05);
        assert_eq!(bounds.lower(), price * 0.95);
        assert_eq!(bounds.upper(), price * 1.05);
    }

    #[test]
    fn test_contains_is_closed() {
        let bounds = RangeBounds::new(100.0, 110.0);
        assert!(bounds.contains(100.0));
        assert!(bounds.contains(110.0));
        assert!(!bounds.contains(99.99));
        assert!(!bounds.contains(f64::NAN));
    }

    #[test]
    fn test_set_clamped_lower_stops_at_upper() {
        let mut bounds = RangeBounds::new(100.0, 110.0);
        assert!(bounds.set_clamped(Bound::Lower, 500.0));
        assert_eq!(bounds.lower(), 110.0);
        assert_eq!(bounds.upper(), 110.0);
    }

    #[test]
    fn test_set_clamped_upper_stops_at_lower() {
        let mut bounds = RangeBounds::new(100.0, 110.0);
        bounds.set_clamped(Bound::Upper, 1.0);
        assert_eq!(bounds.upper(), 100.0);
        assert!(bounds.lower() <= bounds.upper());
    }

    #[test]
    fn test_set_clamped_reports_no_change() {
        let mut bounds = RangeBounds::new(100.0, 110.0);
        assert!(!bounds.set_clamped(Bound::Upper, 110.0));
    }

    #[test]
    fn test_bound_other() {
        assert_eq!(Bound::Lower.other(), Bound::Upper);
        assert_eq!(Bound::Upper.other(), Bound::Lower);
    }
}
