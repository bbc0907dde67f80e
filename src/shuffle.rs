use crate::cups::{Arrangement, CupId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One shuffle swap: all three cups rotate one slot at once. Only these two
/// 3-cycles ever occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
}

/// A full round plan: which cup hides the ball and the swap sequence.
///
/// ```
/// use cupgo_rs::shuffle::ShufflePlan;
///
/// let plan = ShufflePlan::plan_seeded(42);
/// assert!(plan.swap_count() >= ShufflePlan::MIN_SWAPS);
/// assert!(plan.swap_count() <= ShufflePlan::MAX_SWAPS);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShufflePlan {
    ball_cup: CupId,
    spins: Vec<Spin>,
}

impl ShufflePlan {
    pub const MIN_SWAPS: usize = 3;
    pub const MAX_SWAPS: usize = 5;

    /// Plan a round using the provided RNG: ball cup uniform over the three
    /// cups, swap count uniform in `MIN_SWAPS..=MAX_SWAPS`, each swap
    /// direction uniform over the two cycles.
    pub fn plan_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let ball_cup = CupId::ALL[rng.random_range(0..CupId::ALL.len())];
        let count = rng.random_range(Self::MIN_SWAPS..=Self::MAX_SWAPS);
        let spins = (0..count)
            .map(|_| if rng.random::<bool>() { Spin::Clockwise } else { Spin::CounterClockwise })
            .collect();
        Self { ball_cup, spins }
    }

    /// Plan from a seed for reproducibility.
    pub fn plan_seeded(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::plan_with(&mut rng)
    }

    /// The cup hiding the ball for the whole round.
    pub fn ball_cup(&self) -> CupId {
        self.ball_cup
    }

    /// The planned swaps in order.
    pub fn spins(&self) -> &[Spin] {
        &self.spins
    }

    pub fn swap_count(&self) -> usize {
        self.spins.len()
    }

    /// Arrangement after every planned swap, starting from the home slots.
    pub fn final_arrangement(&self) -> Arrangement {
        let mut a = Arrangement::start();
        for &spin in &self.spins {
            a.apply(spin);
        }
        a
    }
}
