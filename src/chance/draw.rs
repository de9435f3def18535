use rand::{Rng, RngCore};

/// Source of uniform integer draws for weighted selection.
///
/// Every `rand` generator is a draw source, so a seeded `StdRng` gives a
/// reproducible walk. Tests can implement this directly to script the exact
/// draws a network sees.
pub trait WeightedDraw {
    /// Draw a uniform integer in `[0, bound)`. `bound` is always positive.
    fn draw_below(&mut self, bound: u32) -> u32;
}

impl<R: RngCore> WeightedDraw for R {
    fn draw_below(&mut self, bound: u32) -> u32 {
        self.gen_range(0..bound)
    }
}

/// Pick an index from `weights` by accumulating them in order until the running
/// sum exceeds a draw in `[0, total)`.
///
/// Returns `None` when the weights sum to zero or past `u32::MAX`.
pub fn pick_weighted<D, I>(draws: &mut D, weights: I) -> Option<usize>
where
    D: WeightedDraw + ?Sized,
    I: IntoIterator<Item = u32> + Clone,
{
    let total: u64 = weights.clone().into_iter().map(u64::from).sum();
    if total == 0 {
        return None;
    }
    // Totals past u32::MAX are refused when links are added.
    let bound = u32::try_from(total).ok()?;
    let draw = u64::from(draws.draw_below(bound));

    let mut running = 0u64;
    for (index, weight) in weights.into_iter().enumerate() {
        running += u64::from(weight);
        if running > draw {
            return Some(index);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u32);

    impl WeightedDraw for Fixed {
        fn draw_below(&mut self, _bound: u32) -> u32 {
            self.0
        }
    }

    #[test]
    fn draw_lands_in_half_open_interval() {
        let weights = [10u32, 4];
        assert_eq!(pick_weighted(&mut Fixed(0), weights), Some(0));
        assert_eq!(pick_weighted(&mut Fixed(9), weights), Some(0));
        assert_eq!(pick_weighted(&mut Fixed(10), weights), Some(1));
        assert_eq!(pick_weighted(&mut Fixed(13), weights), Some(1));
    }

    #[test]
    fn zero_total_picks_nothing() {
        assert_eq!(pick_weighted(&mut Fixed(0), [0u32, 0]), None);
        assert_eq!(pick_weighted(&mut Fixed(0), std::iter::empty::<u32>()), None);
        assert_eq!(pick_weighted(&mut Fixed(0), [u32::MAX, 1]), None);
    }

    #[test]
    fn rng_draws_stay_below_bound() {
        use rand::{rngs::StdRng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            assert!(rng.draw_below(5) < 5);
        }
    }
}
