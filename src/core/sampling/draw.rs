use rand::Rng;
use rand::seq::index;

/// Keep at most `cap` items, drawn uniformly without replacement.
///
/// When there are no more than `cap` items they are all returned in their
/// original order and the generator is left untouched.
pub fn draw_without_replacement<T: Copy, R: Rng + ?Sized>(
    items: Vec<T>,
    cap: usize,
    rng: &mut R,
) -> Vec<T> {
    if items.len() <= cap {
        return items;
    }
    index::sample(rng, items.len(), cap)
        .into_iter()
        .map(|i| items[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn under_cap_keeps_everything_in_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(draw_without_replacement(items.clone(), 10, &mut rng), items);
        assert_eq!(draw_without_replacement(items.clone(), 50, &mut rng), items);
    }

    #[test]
    fn over_cap_draws_distinct_members() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let items: Vec<u32> = (100..1100).collect();
        let drawn = draw_without_replacement(items, 25, &mut rng);

        assert_eq!(drawn.len(), 25);
        let unique: HashSet<_> = drawn.iter().collect();
        assert_eq!(unique.len(), 25);
        assert!(drawn.iter().all(|v| (100..1100).contains(v)));
    }

    #[test]
    fn same_seed_same_draw() {
        let items: Vec<u32> = (0..500).collect();
        let a = draw_without_replacement(items.clone(), 40, &mut ChaCha8Rng::seed_from_u64(42));
        let b = draw_without_replacement(items, 40, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn every_item_can_be_drawn() {
        // 4 of 5 over many seeds should eventually leave out each item once
        let mut left_out = HashSet::new();
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let drawn = draw_without_replacement(vec![0, 1, 2, 3, 4], 4, &mut rng);
            let missing: Vec<_> = (0..5).filter(|v| !drawn.contains(v)).collect();
            assert_eq!(missing.len(), 1);
            left_out.insert(missing[0]);
        }
        assert_eq!(left_out.len(), 5);
    }
}
