use ilm::prelude::*;

fn b(s: &str) -> BitString {
    s.parse().unwrap()
}

#[test]
fn config() {
    let config = FixedWidthConfig::new(4, 8, 2).unwrap();
    assert_eq!(config.input_bits(), bw(4));
    assert_eq!(config.output_bits(), bw(8));
    assert_eq!(config.correction_iterations(), bw(2));
    let mul = FixedWidthMultiplier::from_config(config);
    assert_eq!(mul.config(), &config);
    assert_eq!(FixedWidthMultiplier::new(4, 8, 2).unwrap(), mul);
}

#[test]
fn invalid_config() {
    assert_eq!(
        FixedWidthMultiplier::new(0, 8, 1),
        Err(IlmError::InvalidConfig {
            field: "input_bits"
        })
    );
    assert_eq!(
        FixedWidthMultiplier::new(4, 0, 1),
        Err(IlmError::InvalidConfig {
            field: "output_bits"
        })
    );
    assert_eq!(
        FixedWidthConfig::new(4, 8, 0),
        Err(IlmError::InvalidConfig {
            field: "correction_iterations"
        })
    );
}

#[test]
fn width_mismatch() {
    let mul = FixedWidthMultiplier::new(4, 8, 4).unwrap();
    assert_eq!(
        mul.multiply(&b("011"), &b("0011")),
        Err(IlmError::WidthMismatch {
            expected: 4,
            found: 3
        })
    );
    assert_eq!(
        mul.multiply(&b("0011"), &b("00011")),
        Err(IlmError::WidthMismatch {
            expected: 4,
            found: 5
        })
    );
    assert_eq!(
        mul.multiply_str("0021", "0011"),
        Err(IlmError::InvalidBinaryString)
    );
}

#[test]
fn three_by_three() {
    let mul = FixedWidthMultiplier::new(4, 8, 4).unwrap();
    assert_eq!(mul.multiply(&b("0011"), &b("0011")).unwrap(), b("00001001"));
    let mul = FixedWidthMultiplier::new(4, 8, 1).unwrap();
    assert_eq!(mul.multiply(&b("0011"), &b("0011")).unwrap(), b("00001000"));
}

#[test]
fn zero_product_is_padded() {
    let mul = FixedWidthMultiplier::new(4, 8, 2).unwrap();
    assert_eq!(mul.multiply(&b("0000"), &b("1011")).unwrap(), b("00000000"));
    let mul = FixedWidthMultiplier::new(4, 1, 2).unwrap();
    assert_eq!(mul.multiply(&b("1011"), &b("0000")).unwrap(), b("0"));
}

#[test]
fn truncation_keeps_most_significant_bits() {
    // 15 * 15 = 225 = 0b11100001
    let mul = FixedWidthMultiplier::new(4, 4, 4).unwrap();
    assert_eq!(mul.multiply(&b("1111"), &b("1111")).unwrap(), b("1110"));
    let mul = FixedWidthMultiplier::new(4, 7, 4).unwrap();
    assert_eq!(mul.multiply(&b("1111"), &b("1111")).unwrap(), b("1110000"));
    // one iteration gives 176 = 0b10110000
    let mul = FixedWidthMultiplier::new(4, 4, 1).unwrap();
    assert_eq!(mul.multiply(&b("1111"), &b("1111")).unwrap(), b("1011"));
    // a normalized width equal to the output is kept as is
    let mul = FixedWidthMultiplier::new(4, 8, 4).unwrap();
    assert_eq!(mul.multiply(&b("1111"), &b("1111")).unwrap(), b("11100001"));
    // wider outputs are padded
    let mul = FixedWidthMultiplier::new(4, 12, 4).unwrap();
    assert_eq!(mul.multiply(&b("1111"), &b("1111")).unwrap(), b("000011100001"));
}

#[test]
fn determinism() {
    for iterations in 1..=8 {
        let mul = FixedWidthMultiplier::new(8, 6, iterations).unwrap();
        let x: BitString = "10110111".parse().unwrap();
        let y: BitString = "01101101".parse().unwrap();
        let p0 = mul.multiply(&x, &y).unwrap();
        let p1 = mul.multiply(&x, &y).unwrap();
        assert_eq!(p0, p1);
        // a second multiplier with the same configuration agrees
        let other = FixedWidthMultiplier::from_config(*mul.config());
        assert_eq!(other.multiply(&x, &y).unwrap(), p0);
        assert_eq!(mul.multiply_str("10110111", "01101101").unwrap(), p0);
    }
}

#[test]
fn exhaustive_small() {
    for w in 1..=6usize {
        let mul = FixedWidthMultiplier::new(w, 2 * w, w).unwrap();
        for x in 0..(1u128 << w) {
            for y in 0..(1u128 << w) {
                let p = mul
                    .multiply(
                        &BitString::from_u128(x, bw(w)),
                        &BitString::from_u128(y, bw(w)),
                    )
                    .unwrap();
                assert_eq!(p.bw(), 2 * w);
                assert_eq!(p.to_u128(), Some(x * y));
            }
        }
    }
}
