use rand::Rng;

/// Returns a uniformly random permutation of `items` using the process RNG.
/// The input is left untouched.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(&mut rand::rng(), items)
}

/// Same as [`shuffle`] with an explicit random source.
pub fn shuffle_with<T: Clone, R: Rng>(rng: &mut R, items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sorted<T: Ord + Clone>(items: &[T]) -> Vec<T> {
        let mut v = items.to_vec();
        v.sort();
        v
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let input = vec![1, 2, 2, 3, 5, 8, 13, 21];
        let output = shuffle(&input);
        assert_eq!(output.len(), input.len());
        assert_eq!(sorted(&output), sorted(&input));
        assert_eq!(input, vec![1, 2, 2, 3, 5, 8, 13, 21]);
    }

    #[test]
    fn test_shuffle_trivial_inputs() {
        let empty: Vec<u8> = vec![];
        assert!(shuffle(&empty).is_empty());
        assert_eq!(shuffle(&["only"]), vec!["only"]);
    }

    #[test]
    fn test_every_position_is_reachable() {
        // With 3 elements each value should land in each slot at some point.
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let input = ['a', 'b', 'c'];
        let mut seen = [[false; 3]; 3];
        for _ in 0..300 {
            let out = shuffle_with(&mut rng, &input);
            for (pos, c) in out.iter().enumerate() {
                let idx = input.iter().position(|x| x == c).unwrap();
                seen[idx][pos] = true;
            }
        }
        assert!(seen.iter().flatten().all(|&s| s));
    }

    #[test]
    fn test_roughly_uniform_first_slot() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let input: Vec<usize> = (0..4).collect();
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[shuffle_with(&mut rng, &input)[0]] += 1;
        }
        for count in counts {
            assert!((700..1300).contains(&count), "skewed counts: {counts:?}");
        }
    }
}
