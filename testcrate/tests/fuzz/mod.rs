use ilm::prelude::*;
use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro128StarStar,
};
use testcrate::{ilm_model, mask};

/// Returns a random bitwidth in `1..=max`
fn rand_bw(rng: &mut Xoshiro128StarStar, max: usize) -> usize {
    ((rng.next_u32() as usize) % max) + 1
}

/// Returns a random `BitString` of bitwidth `w` along with its value. Half of
/// the time a random number of the high bits are cleared, so that leading bits
/// are not concentrated at the top.
fn rand_bits(rng: &mut Xoshiro128StarStar, w: usize) -> (BitString, u128) {
    let x = BitString::rand_using(bw(w), rng).unwrap();
    let x = if (rng.next_u32() & 1) == 0 {
        let keep = (rng.next_u32() as usize) % w;
        x.shl(w - keep).shift_right(w - keep, bw(w))
    } else {
        x
    };
    let val = x.to_u128().unwrap();
    (x, val)
}

/// Checks the primitives against plain integer arithmetic
pub fn primitives(n: u32, seed: u64) -> Option<()> {
    let mut rng = Xoshiro128StarStar::seed_from_u64(seed);
    for _ in 0..n {
        let w0 = rand_bw(&mut rng, 127);
        let w1 = rand_bw(&mut rng, 127);
        let (x0, v0) = rand_bits(&mut rng, w0);
        let (x1, v1) = rand_bits(&mut rng, w1);

        // ripple-carry addition
        let w = w0.max(w1);
        let (sum, carry) = x0.ripple_add(&x1);
        assert_eq!(sum.bw(), w);
        assert_eq!(sum.to_u128()?, (v0 + v1) & mask(w));
        assert_eq!(carry, ((v0 + v1) >> w) != 0);
        assert_eq!(x0.widening_add(&x1).to_u128()?, v0 + v1);

        // shifts
        let s = (rng.next_u32() as usize) % 130;
        let out = rand_bw(&mut rng, 128);
        let shl = x0.shift_left(s, bw(out));
        assert_eq!(shl.bw(), out);
        assert_eq!(
            shl.to_u128()?,
            v0.checked_shl(s as u32).unwrap_or(0) & mask(out)
        );
        let shr = x0.shift_right(s, bw(out));
        assert_eq!(shr.to_u128()?, v0.checked_shr(s as u32).unwrap_or(0) & mask(out));
        assert_eq!(x0.shl(s).bw(), w0);

        // bit clearing
        let i = (rng.next_u32() as usize) % w0;
        assert_eq!(x0.clear_bit(i).ok()?.to_u128()?, v0 & !(1u128 << i));
        assert!(x0.clear_bit(w0).is_err());

        // encoding
        let k = x0.priority_encoder();
        assert_eq!(k.bw(), ilm::ilm_internals::index_bits(bw(w0)).get());
        if v0 == 0 {
            assert_eq!(k.to_u128()?, 0);
            assert_eq!(x0.strip_leading_zeros(), None);
        } else {
            let lead = 127 - v0.leading_zeros() as u128;
            assert_eq!(k.to_u128()?, lead);
            let one_hot = k.decoder().ok()?;
            assert_eq!(one_hot.bw(), 1 << k.bw());
            assert_eq!(one_hot.to_u128(), Some(1u128 << lead));
            let norm = x0.strip_leading_zeros()?;
            assert_eq!(norm.bw(), (lead + 1) as usize);
            assert_eq!(norm.to_u128()?, v0);
        }

        // text form
        let text = x1.to_string();
        assert_eq!(text.len(), w1);
        assert!(BitString::validate(&text));
        assert_eq!(text.parse::<BitString>().ok()?, x1);
        assert_eq!(u128::from_str_radix(&text, 2).ok()?, v1);
    }
    Some(())
}

/// The product is exact once the sparser operand runs out of set bits
pub fn exactness(n: u32, seed: u64) -> Option<()> {
    let ilm = Ilm::new();
    let mut rng = Xoshiro128StarStar::seed_from_u64(seed);
    for _ in 0..n {
        let w0 = rand_bw(&mut rng, 64);
        let w1 = rand_bw(&mut rng, 64);
        let (x0, v0) = rand_bits(&mut rng, w0);
        let (x1, v1) = rand_bits(&mut rng, w1);
        let iterations = x0.count_ones().min(x1.count_ones()).max(1);
        let product = ilm.multiply(&x0, &x1, iterations).ok()?;
        assert_eq!(product.to_u128()?, v0 * v1);
        // more iterations change nothing
        assert_eq!(ilm.multiply(&x0, &x1, iterations + 3).ok()?, product);
        // the natural result width is always enough for the product
        assert!(product.bw() >= w0 + w1);
    }
    Some(())
}

/// Every iteration count agrees with the integer model, results increase
/// monotonically, and a single iteration is within a quarter of the product
pub fn convergence(n: u32, seed: u64) -> Option<()> {
    let ilm = Ilm::new();
    let mut rng = Xoshiro128StarStar::seed_from_u64(seed);
    for _ in 0..n {
        let w0 = rand_bw(&mut rng, 64);
        let w1 = rand_bw(&mut rng, 64);
        let (x0, v0) = rand_bits(&mut rng, w0);
        let (x1, v1) = rand_bits(&mut rng, w1);
        let exact = v0 * v1;
        let mut prev = 0;
        for i in 1..=w0.min(w1) {
            let approx = ilm.multiply(&x0, &x1, i).ok()?.to_u128()?;
            assert_eq!(approx, ilm_model(v0, v1, i));
            assert!(approx >= prev);
            assert!(approx <= exact);
            if i == 1 && exact != 0 {
                assert!(4 * (exact - approx) < exact);
            }
            prev = approx;
        }
        assert_eq!(prev, exact);
    }
    Some(())
}

/// The fixed width multiplier keeps the most significant bits of the engine's
/// normalized product
pub fn fixed_width(n: u32, seed: u64) -> Option<()> {
    let ilm = Ilm::new();
    let mut rng = Xoshiro128StarStar::seed_from_u64(seed);
    for _ in 0..n {
        let w = rand_bw(&mut rng, 48);
        let out = rand_bw(&mut rng, 100);
        let iterations = rand_bw(&mut rng, w);
        let mul = FixedWidthMultiplier::new(w, out, iterations).ok()?;
        let (x0, _) = rand_bits(&mut rng, w);
        let (x1, _) = rand_bits(&mut rng, w);
        let raw = ilm.multiply(&x0, &x1, iterations).ok()?.to_u128()?;
        let p = mul.multiply(&x0, &x1).ok()?;
        assert_eq!(p.bw(), out);
        let sig = 128 - raw.leading_zeros() as usize;
        let expected = if sig > out { raw >> (sig - out) } else { raw };
        assert_eq!(p.to_u128()?, expected);
    }
    Some(())
}
