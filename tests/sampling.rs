use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use trivia_board::api::ApiError;
use trivia_board::sampler::sample_ids;

#[test]
fn test_sample_has_requested_size_and_no_duplicates() {
    let pool: Vec<u64> = (1..=100).collect();

    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let ids = sample_ids(&pool, 6, &mut rng).unwrap();
        assert_eq!(ids.len(), 6);

        let distinct: HashSet<_> = ids.iter().collect();
        assert_eq!(distinct.len(), 6, "duplicate in {:?}", ids);
        assert!(ids.iter().all(|id| pool.contains(id)));
    }
}

#[test]
fn test_duplicates_in_pool_are_never_sampled_twice() {
    let pool: Vec<u64> = vec![7, 7, 7, 8, 8, 9];
    let mut rng = StdRng::seed_from_u64(42);

    let mut ids = sample_ids(&pool, 3, &mut rng).unwrap();
    ids.sort();
    assert_eq!(ids, vec![7, 8, 9]);
}

#[test]
fn test_pool_too_small() {
    let pool: Vec<u64> = vec![1, 2, 2, 3];
    let mut rng = StdRng::seed_from_u64(1);

    match sample_ids(&pool, 6, &mut rng) {
        Err(ApiError::InsufficientCategories { wanted, available }) => {
            assert_eq!(wanted, 6);
            assert_eq!(available, 3);
        }
        other => panic!("Expected InsufficientCategories, got {:?}", other),
    }
}

#[test]
fn test_every_id_can_be_chosen() {
    let pool: Vec<u64> = (0..10).collect();
    let mut seen = HashSet::new();
    let mut rng = StdRng::seed_from_u64(9);

    for _ in 0..500 {
        seen.extend(sample_ids(&pool, 2, &mut rng).unwrap());
    }
    assert_eq!(seen.len(), pool.len());
}
