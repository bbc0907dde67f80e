use crate::shuffle::Spin;
use std::fmt;

/// The three cup identities. A cup's identity never changes during a round;
/// only its slot does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CupId {
    Left,
    Middle,
    Right,
}

impl CupId {
    pub const ALL: [CupId; 3] = [CupId::Left, CupId::Middle, CupId::Right];

    pub const fn index(self) -> usize {
        match self {
            CupId::Left => 0,
            CupId::Middle => 1,
            CupId::Right => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CupId::Left => "left",
            CupId::Middle => "middle",
            CupId::Right => "right",
        }
    }
}

impl fmt::Display for CupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CupIndexError {
    #[error("invalid cup index: {0}")]
    OutOfRange(usize),
}

impl TryFrom<usize> for CupId {
    type Error = CupIndexError;

    fn try_from(i: usize) -> Result<Self, Self::Error> {
        CupId::ALL.get(i).copied().ok_or(CupIndexError::OutOfRange(i))
    }
}

/// Which cup currently sits in each of the three fixed position slots.
///
/// ```
/// use cupgo_rs::cups::{Arrangement, CupId};
/// use cupgo_rs::shuffle::Spin;
///
/// let mut a = Arrangement::start();
/// a.apply(Spin::Clockwise);
/// assert_eq!(a.cup_at(1), Some(CupId::Left));
/// assert_eq!(a.slot_of(CupId::Right), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrangement {
    slots: [CupId; 3],
}

impl Arrangement {
    /// The pre-shuffle arrangement: each cup in its home slot.
    pub const fn start() -> Self {
        Self { slots: CupId::ALL }
    }

    pub const fn slots(&self) -> [CupId; 3] {
        self.slots
    }

    pub fn cup_at(&self, slot: usize) -> Option<CupId> {
        self.slots.get(slot).copied()
    }

    pub fn slot_of(&self, cup: CupId) -> usize {
        // Three slots, each holding exactly one cup.
        self.slots.iter().position(|&c| c == cup).unwrap_or(0)
    }

    /// Rotate every cup one slot in the spin's direction.
    pub fn apply(&mut self, spin: Spin) {
        let [a, b, c] = self.slots;
        self.slots = match spin {
            Spin::Clockwise => [c, a, b],
            Spin::CounterClockwise => [b, c, a],
        };
    }
}

impl Default for Arrangement {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cup_index_round_trip() {
        for cup in CupId::ALL {
            assert_eq!(CupId::try_from(cup.index()).unwrap(), cup);
        }
        assert!(CupId::try_from(3).is_err());
    }

    #[test]
    fn clockwise_moves_each_cup_one_slot_forward() {
        let mut a = Arrangement::start();
        a.apply(Spin::Clockwise);
        assert_eq!(a.slots(), [CupId::Right, CupId::Left, CupId::Middle]);
    }

    #[test]
    fn counter_clockwise_is_the_inverse() {
        let mut a = Arrangement::start();
        a.apply(Spin::Clockwise);
        a.apply(Spin::CounterClockwise);
        assert_eq!(a, Arrangement::start());
    }

    #[test]
    fn three_same_spins_return_to_start() {
        for spin in [Spin::Clockwise, Spin::CounterClockwise] {
            let mut a = Arrangement::start();
            for _ in 0..3 {
                a.apply(spin);
            }
            assert_eq!(a, Arrangement::start());
        }
    }

    #[test]
    fn slot_of_tracks_moves() {
        let mut a = Arrangement::start();
        assert_eq!(a.slot_of(CupId::Left), 0);
        a.apply(Spin::Clockwise);
        assert_eq!(a.slot_of(CupId::Left), 1);
        assert_eq!(a.cup_at(a.slot_of(CupId::Middle)), Some(CupId::Middle));
    }
}
