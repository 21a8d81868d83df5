//! Repeating slot patterns.

use std::fmt;

use arrayvec::ArrayVec;
use serde::Serialize;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ScheduleError {
    #[display("a schedule needs at least one slot")]
    Empty,
    #[display("schedule has {len} slots, at most {max} supported", max = Schedule::MAX_LEN)]
    TooLong { len: usize },
}

/// A repeating pattern of time slots.
///
/// A schedule of length `s` assigns its slots to a fixed number of meetings
/// round-robin: meeting `k` takes place at `slots[k mod s]`. When the
/// meeting count is not a multiple of `s`, the earlier slots receive the
/// extra meetings.
///
/// # Canonical form
///
/// Two schedules are interchangeable if, repeated, they produce the same
/// multiset of slots in the same proportions: `[3, 3, 3]` behaves like `[3]`
/// and `[3, 3, 6, 6]` like `[3, 6]`. [`Schedule::canonicalize`] sorts the
/// slots and divides every slot's multiplicity by their greatest common
/// divisor, yielding the shortest equivalent schedule. Canonicalization is
/// idempotent, and canonical schedules order totally, so they can key
/// deduplication sets directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    slots: ArrayVec<usize, { Schedule::MAX_LEN }>,
}

impl Schedule {
    /// Hard cap on schedule length; search depth is further limited by
    /// configuration.
    pub const MAX_LEN: usize = 8;

    /// Creates a schedule from slot indices, preserving their order.
    pub fn new<I>(slots: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut buf = ArrayVec::new();
        for slot in slots {
            buf.try_push(slot)
                .map_err(|_| ScheduleError::TooLong { len: buf.len() + 1 })?;
        }
        if buf.is_empty() {
            return Err(ScheduleError::Empty);
        }
        Ok(Self { slots: buf })
    }

    // A schedule is never empty, so no `is_empty` to pair with `len`.
    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// Slot assigned to meeting `meeting` under round-robin assignment.
    #[must_use]
    pub fn slot_for_meeting(&self, meeting: usize) -> usize {
        self.slots[meeting % self.slots.len()]
    }

    /// Returns the shortest schedule with the same slot proportions.
    #[must_use]
    pub fn canonicalize(&self) -> Self {
        let mut sorted = self.slots.clone();
        sorted.sort_unstable();

        // Run lengths of the sorted slots are the multiplicities
        let mut runs: ArrayVec<(usize, usize), { Self::MAX_LEN }> = ArrayVec::new();
        for &slot in &sorted {
            match runs.last_mut() {
                Some((last, count)) if *last == slot => *count += 1,
                _ => runs.push((slot, 1)),
            }
        }

        let divisor = runs.iter().fold(0, |acc, &(_, count)| gcd(acc, count));
        let mut slots = ArrayVec::new();
        for &(slot, count) in &runs {
            for _ in 0..count / divisor {
                slots.push(slot);
            }
        }
        Self { slots }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{slot}")?;
        }
        Ok(())
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(slots: &[usize]) -> Schedule {
        Schedule::new(slots.iter().copied()).unwrap()
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(Schedule::new([]), Err(ScheduleError::Empty)));
    }

    #[test]
    fn test_too_long_rejected() {
        let err = Schedule::new([0; Schedule::MAX_LEN + 1]);
        assert!(matches!(err, Err(ScheduleError::TooLong { .. })));
    }

    #[test]
    fn test_round_robin_assignment() {
        let s = schedule(&[2, 5]);
        let slots: Vec<_> = (0..5).map(|k| s.slot_for_meeting(k)).collect();
        assert_eq!(slots, [2, 5, 2, 5, 2]);
    }

    #[test]
    fn test_canonicalize_repeated_single_slot() {
        assert_eq!(schedule(&[3, 3, 3]).canonicalize(), schedule(&[3]));
    }

    #[test]
    fn test_canonicalize_repeated_pair() {
        assert_eq!(schedule(&[3, 3, 6, 6]).canonicalize(), schedule(&[3, 6]));
        assert_eq!(schedule(&[3, 6, 3, 6]).canonicalize(), schedule(&[3, 6]));
    }

    #[test]
    fn test_canonicalize_uneven_proportions() {
        // Multiplicities 2:4 reduce to 1:2, not to the distinct pair
        assert_eq!(
            schedule(&[3, 3, 6, 6, 6, 6]).canonicalize(),
            schedule(&[3, 6, 6])
        );
        assert_eq!(schedule(&[3, 3, 6]).canonicalize(), schedule(&[3, 3, 6]));
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        for slots in [&[1_usize, 2, 3][..], &[3, 3, 6, 6], &[0], &[4, 4, 4, 2]] {
            let once = schedule(slots).canonicalize();
            assert_eq!(once.canonicalize(), once);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(schedule(&[0, 3, 7]).to_string(), "0,3,7");
    }

    #[test]
    fn test_serialize_as_slot_list() {
        let json = serde_json::to_string(&schedule(&[1, 4])).unwrap();
        assert_eq!(json, "[1,4]");
    }
}
