//! Uniform sampling helpers.
//!
//! Every random draw in the engine goes through these two functions so the
//! no-duplicate invariant is enforced in one place instead of ad hoc index
//! shuffling at each call site.

use rand::seq::SliceRandom;
use rand::Rng;

/// Draw up to `k` distinct items uniformly at random, without replacement.
/// Requesting more than `items.len()` caps at the available count.
pub fn sample_distinct<T: Clone, R: Rng + ?Sized>(items: &[T], k: usize, rng: &mut R) -> Vec<T> {
    items.choose_multiple(rng, k.min(items.len())).cloned().collect()
}

/// Uniform single pick; `None` on an empty slice.
pub fn pick_one<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{pick_one, sample_distinct};

    #[test]
    fn sample_never_repeats_and_caps_at_len() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<u32> = (0..5).collect();

        let drawn = sample_distinct(&items, 10, &mut rng);
        assert_eq!(drawn.len(), 5);
        let unique: HashSet<_> = drawn.iter().collect();
        assert_eq!(unique.len(), 5);

        let two = sample_distinct(&items, 2, &mut rng);
        assert_eq!(two.len(), 2);
        assert_ne!(two[0], two[1]);
    }

    #[test]
    fn pick_one_handles_empty_input() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty: Vec<u32> = Vec::new();
        assert!(pick_one(&empty, &mut rng).is_none());
        assert!(pick_one(&[42], &mut rng).is_some());
    }
}
