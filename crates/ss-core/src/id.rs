use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a screen inside the controller's live collection.
///
/// Small and densely packed: a deleted screen's id is handed to the next
/// screen that gets added (see [`find_first_missing`]).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScreenId(pub u32);

impl fmt::Debug for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen#{}", self.0)
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen#{}", self.0)
    }
}

/// Identifier the rendering surface issued for one drawn shape.
/// Invalidated by every redraw.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "elem#{}", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Smallest non-negative integer not present in `ids`.
///
/// Assumes ids were handed out from 0 upward, so after sorting the first
/// index `i` holding something other than `i` is the gap. With no gap the
/// next id is `ids.len()`. Input order does not matter.
pub fn find_first_missing(ids: &[u32]) -> u32 {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut expected = 0u32;
    for value in sorted {
        if value != expected {
            break;
        }
        expected += 1;
    }
    expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_missing_of_empty_is_zero() {
        assert_eq!(find_first_missing(&[]), 0);
    }

    #[test]
    fn first_missing_finds_gap() {
        let mut ids = vec![0, 1, 2, 3, 5, 4, 7, 8];
        assert_eq!(find_first_missing(&ids), 6);

        ids.push(6);
        assert_eq!(find_first_missing(&ids), 9);
    }

    #[test]
    fn first_missing_ignores_input_order() {
        let shuffled = [8, 2, 0, 7, 1, 4, 5, 3];
        let mut sorted = shuffled;
        sorted.sort_unstable();
        assert_eq!(find_first_missing(&shuffled), find_first_missing(&sorted));
        assert_eq!(find_first_missing(&shuffled), 6);
    }

    #[test]
    fn first_missing_reuses_zero() {
        assert_eq!(find_first_missing(&[1, 2]), 0);
    }

    #[test]
    fn ids_display() {
        assert_eq!(ScreenId(3).to_string(), "screen#3");
        assert_eq!(format!("{:?}", ElementId(12)), "elem#12");
    }
}
