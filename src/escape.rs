//! The escape-time evaluator.

use num::Complex;

/// The outcome of iterating a single point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EscapeResult {
    /// The orbit stayed inside radius 2 for the whole budget.
    Bounded,
    /// The orbit left radius 2; the count is in `1..calc_iter_num`.
    Escaped(u32),
}

/// This is our classic iterator function, with one twist: the orbit
/// is tested from `z = c`, the first iterate, rather than from zero.
/// Counting starts at 1, so a point already outside radius 2 escapes
/// with a count of 1.  A count that reaches `calc_iter_num` is
/// `Bounded`.  Renderers that test `z = 0` first count one extra
/// step for points with `|c| >= 2`, so their blue channel differs.
#[inline]
pub fn escape_time(c: Complex<f32>, calc_iter_num: u32) -> EscapeResult {
    let mut z = c;
    let mut iter = 1;
    while iter < calc_iter_num && z.norm_sqr() < 4.0 {
        z = z * z + c;
        iter += 1;
    }
    if iter >= calc_iter_num {
        EscapeResult::Bounded
    } else {
        EscapeResult::Escaped(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        for budget in &[2, 3, 50, 1000] {
            assert_eq!(escape_time(Complex::new(0.0, 0.0), *budget), EscapeResult::Bounded);
        }
    }

    #[test]
    fn far_points_escape_immediately() {
        assert_eq!(escape_time(Complex::new(2.0, 0.0), 2), EscapeResult::Escaped(1));
        assert_eq!(escape_time(Complex::new(-3.0, 4.0), 50), EscapeResult::Escaped(1));
        assert_eq!(escape_time(Complex::new(0.0, -2.0), 50), EscapeResult::Escaped(1));
    }

    #[test]
    fn minimal_budget_bounds_everything_inside_radius_two() {
        assert_eq!(escape_time(Complex::new(1.9, 0.0), 2), EscapeResult::Bounded);
        assert_eq!(escape_time(Complex::new(-0.75, 0.1), 2), EscapeResult::Bounded);
    }

    #[test]
    fn counts_steps_from_first_iterate() {
        // c = 1: z runs 1, 2, 6.  |2|^2 == 4 stops the loop after one step.
        assert_eq!(escape_time(Complex::new(1.0, 0.0), 50), EscapeResult::Escaped(2));
        // c = 0.5: z runs 0.5, 0.75, 1.0625, 1.6289..., 3.1533...
        assert_eq!(escape_time(Complex::new(0.5, 0.0), 50), EscapeResult::Escaped(5));
    }

    #[test]
    fn escape_count_stays_below_budget() {
        let c = Complex::new(0.5, 0.0);
        assert_eq!(escape_time(c, 5), EscapeResult::Bounded);
        assert_eq!(escape_time(c, 6), EscapeResult::Escaped(5));
    }

    #[test]
    fn cardioid_points_are_bounded() {
        assert_eq!(escape_time(Complex::new(-0.5, 0.5), 1000), EscapeResult::Bounded);
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 1000), EscapeResult::Bounded);
        assert_eq!(escape_time(Complex::new(0.25, 0.0), 1000), EscapeResult::Bounded);
    }
}
