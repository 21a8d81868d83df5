//! Candidate schedule enumeration.

use quorum_model::Schedule;

/// Lazy generator of every non-decreasing slot tuple of a fixed length —
/// combinations with repetition over `0..slot_count`, in lexicographic
/// order.
///
/// The successor of a tuple is found by incrementing the rightmost entry
/// that has room and resetting everything after it to the new value, which
/// keeps the tuple non-decreasing. Iterative on purpose: the recursive
/// formulation would stack a frame per schedule position.
///
/// # Examples
///
/// ```
/// use quorum_search::Variants;
///
/// let tuples: Vec<Vec<usize>> = Variants::new(2, 3)
///     .map(|s| s.slots().to_vec())
///     .collect();
/// assert_eq!(
///     tuples,
///     [[0, 0], [0, 1], [0, 2], [1, 1], [1, 2], [2, 2]]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Variants {
    slot_count: usize,
    current: Option<Vec<usize>>,
}

impl Variants {
    /// Enumerates tuples of length `size` over `0..slot_count`.
    #[must_use]
    pub fn new(size: usize, slot_count: usize) -> Self {
        let current = (size > 0 && size <= Schedule::MAX_LEN && slot_count > 0)
            .then(|| vec![0; size]);
        Self {
            slot_count,
            current,
        }
    }
}

impl Iterator for Variants {
    type Item = Schedule;

    fn next(&mut self) -> Option<Schedule> {
        let current = self.current.as_mut()?;
        let schedule = Schedule::new(current.iter().copied())
            .unwrap_or_else(|_| unreachable!("enumerated tuples are non-empty and bounded"));

        // Advance to the successor, or finish.
        match current.iter().rposition(|&slot| slot + 1 < self.slot_count) {
            Some(pos) => {
                let next = current[pos] + 1;
                for slot in &mut current[pos..] {
                    *slot = next;
                }
            }
            None => self.current = None,
        }

        Some(schedule)
    }
}
