use std::cmp::Ordering;

/// A macro to unwrap an option to its `Some` value, and panic if `None`.
/// This is the same as [Option::unwrap], except that it accepts a format
/// string and format arguments, allowing for more flexibility in error
/// messages.
#[macro_export]
macro_rules! unwrap {
    ($opt:expr, $fmt:expr, $($arg:tt)*) => {
        match $opt {
            Some(v) => v,
            None => panic!($fmt, $($arg)*),
        }
    };
}

/// Compare two `PartialOrd` values dangerously. If the partial comparison
/// fails (returns `None`), this will panic. This is useful if you have
/// floats that you know for a fact will not be `NaN`.
pub fn cmp_unwrap<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap()
}

/// The number of lattice points within a given hex distance of a center.
/// Radius 0 means 1 hex, 1 is 7 hexes, 2 is 19, etc.
pub fn range_len(radius: u64) -> usize {
    // Always 3r^2+3r+1 (a reduction of a geometric sum): f(0) = 1, and we
    // add 6r hexes for every ring after that, so 1, (+6) 7, (+12) 19, ...
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_len() {
        assert_eq!(range_len(0), 1);
        assert_eq!(range_len(1), 7);
        assert_eq!(range_len(2), 19);
        assert_eq!(range_len(3), 37);
    }
}
