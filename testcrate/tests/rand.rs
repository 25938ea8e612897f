use ilm::prelude::*;
use rand_xoshiro::{rand_core::SeedableRng, Xoshiro128StarStar};

#[test]
fn rand() {
    let mut rng0 = Xoshiro128StarStar::seed_from_u64(0);
    let mut rng1 = Xoshiro128StarStar::seed_from_u64(0);
    for w in 1..300 {
        let x = BitString::rand_using(bw(w), &mut rng0).unwrap();
        assert_eq!(x.bw(), w);
        assert_eq!(x.to_string().len(), w);
        // the unused bits must stay cleared for equality to work
        assert_eq!(x, x.zero_resize(bw(w + 7)).zero_resize(bw(w)));
        assert_eq!(x, BitString::rand_using(bw(w), &mut rng1).unwrap());
    }
}

#[test]
fn rand_is_not_constant() {
    let mut rng = Xoshiro128StarStar::seed_from_u64(1);
    let mut ones = 0;
    for _ in 0..64 {
        ones += BitString::rand_using(bw(128), &mut rng)
            .unwrap()
            .count_ones();
    }
    // 8192 fair coin flips
    assert!((3596..=4596).contains(&ones), "{ones}");
    let mut rng0 = Xoshiro128StarStar::seed_from_u64(2);
    let mut rng1 = Xoshiro128StarStar::seed_from_u64(3);
    assert_ne!(
        BitString::rand_using(bw(128), &mut rng0).unwrap(),
        BitString::rand_using(bw(128), &mut rng1).unwrap()
    );
}
