//! Simulated variant callers.
//!
//! A caller reports a random subset of the truth, sized by its sensitivity, plus a random subset
//! of the decoys, sized so that the fraction of true calls matches its precision.
//! The truth itself is a caller with sensitivity = precision = 1 and no decoys.
use definitions::{CallerSummary, Tally, Variant};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Range of the sensitivity and the precision drawn for a caller when they are not given.
pub const PERFORMANCE_RANGE: std::ops::Range<f64> = 0.5..0.95;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CallerConfig {
    pub sensitivity: Option<f64>,
    pub precision: Option<f64>,
}

impl CallerConfig {
    pub fn new(sensitivity: Option<f64>, precision: Option<f64>) -> Self {
        Self {
            sensitivity,
            precision,
        }
    }
    /// Sensitivity and precision are drawn from [PERFORMANCE_RANGE](PERFORMANCE_RANGE).
    pub fn random() -> Self {
        Self::default()
    }
    pub fn perfect() -> Self {
        Self::new(Some(1f64), Some(1f64))
    }
}

/// Truth and decoy pools, for SNVs and indels.
#[derive(Debug, Clone, Default)]
pub struct VariantPools {
    pub snvs_valid: Vec<Variant>,
    pub snvs_invalid: Vec<Variant>,
    pub indels_valid: Vec<Variant>,
    pub indels_invalid: Vec<Variant>,
}

impl VariantPools {
    pub fn new(
        snvs_valid: Vec<Variant>,
        snvs_invalid: Vec<Variant>,
        indels_valid: Vec<Variant>,
        indels_invalid: Vec<Variant>,
    ) -> Self {
        Self {
            snvs_valid,
            snvs_invalid,
            indels_valid,
            indels_invalid,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Caller {
    name: String,
    sensitivity: f64,
    precision: f64,
    snvs: Vec<Variant>,
    indels: Vec<Variant>,
    snv_tally: Tally,
    indel_tally: Tally,
}

impl Caller {
    pub fn new<R: Rng>(rng: &mut R, name: &str, pools: &VariantPools, config: &CallerConfig) -> Self {
        let sensitivity = config
            .sensitivity
            .unwrap_or_else(|| rng.gen_range(PERFORMANCE_RANGE));
        let precision = config
            .precision
            .unwrap_or_else(|| rng.gen_range(PERFORMANCE_RANGE));
        let (tp_frac, fp_frac) = call_fractions(sensitivity, precision);
        let (snvs, snv_tally) = select_calls(
            rng,
            &pools.snvs_valid,
            &pools.snvs_invalid,
            tp_frac,
            fp_frac,
        );
        let (indels, indel_tally) = select_calls(
            rng,
            &pools.indels_valid,
            &pools.indels_invalid,
            tp_frac,
            fp_frac,
        );
        debug!("CALLER\t{}\t{:.3}\t{:.3}", name, sensitivity, precision);
        debug!("CALLER\t{}\tSNV\t{:?}", name, snv_tally);
        debug!("CALLER\t{}\tINDEL\t{:?}", name, indel_tally);
        Self {
            name: name.to_string(),
            sensitivity,
            precision,
            snvs,
            indels,
            snv_tally,
            indel_tally,
        }
    }
    /// The perfect caller, reporting all the truth variants and nothing else.
    pub fn truth<R: Rng>(rng: &mut R, name: &str, snvs: &[Variant], indels: &[Variant]) -> Self {
        let pools = VariantPools::new(snvs.to_vec(), vec![], indels.to_vec(), vec![]);
        Self::new(rng, name, &pools, &CallerConfig::perfect())
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }
    pub fn precision(&self) -> f64 {
        self.precision
    }
    pub fn snvs(&self) -> &[Variant] {
        &self.snvs
    }
    pub fn indels(&self) -> &[Variant] {
        &self.indels
    }
    pub fn summary(&self) -> CallerSummary {
        CallerSummary {
            name: self.name.clone(),
            sensitivity: self.sensitivity,
            precision: self.precision,
            snv: self.snv_tally,
            indel: self.indel_tally,
        }
    }
}

/// The fractions of the truth pool to be reported as true positives and false positives.
/// With TP = s|valid|, requiring TP/(TP+FP) = p gives FP = s(1-p)/p |valid|.
/// The precision is not checked to be positive: as p goes to 0 the decoy fraction diverges,
/// and the number of false positives is then capped by the size of the decoy pool.
pub fn call_fractions(sensitivity: f64, precision: f64) -> (f64, f64) {
    let fp_frac = sensitivity * (1f64 - precision) / precision;
    (sensitivity, fp_frac)
}

fn select_calls<R: Rng>(
    rng: &mut R,
    valid: &[Variant],
    invalid: &[Variant],
    tp_frac: f64,
    fp_frac: f64,
) -> (Vec<Variant>, Tally) {
    // `as` truncates toward zero, saturates on infinity, and maps NaN to zero.
    let tp = ((tp_frac * valid.len() as f64) as usize).min(valid.len());
    let fp = ((fp_frac * valid.len() as f64) as usize).min(invalid.len());
    let mut calls: Vec<Variant> = valid.choose_multiple(rng, tp).cloned().collect();
    calls.extend(invalid.choose_multiple(rng, fp).cloned());
    calls.sort();
    let tally = Tally {
        true_positive: tp,
        false_positive: fp,
    };
    (calls, tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;
    use std::collections::HashSet;
    fn pool(chrom: &str, n: usize, indel: bool) -> Vec<Variant> {
        (0..n)
            .map(|i| match indel {
                false => Variant::Snv {
                    chrom: chrom.to_string(),
                    pos: i + 1,
                    refr: b'C',
                    alt: b'T',
                },
                true => Variant::Indel {
                    chrom: chrom.to_string(),
                    pos: i + 1,
                    refr: "C".to_string(),
                    alt: "CA".to_string(),
                },
            })
            .collect()
    }
    fn pools(valid: usize, invalid: usize) -> VariantPools {
        VariantPools::new(
            pool("1", valid, false),
            pool("2", invalid, false),
            pool("1", valid / 10, true),
            pool("2", invalid / 10, true),
        )
    }
    #[test]
    fn truth_caller() {
        let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(0);
        let pools = pools(300, 1200);
        let truth = Caller::truth(&mut rng, "truth", &pools.snvs_valid, &pools.indels_valid);
        assert_eq!(truth.snvs(), pools.snvs_valid.as_slice());
        assert_eq!(truth.indels(), pools.indels_valid.as_slice());
        assert_eq!(truth.sensitivity(), 1f64);
        assert_eq!(truth.precision(), 1f64);
        let summary = truth.summary();
        assert_eq!(summary.snv.true_positive, 300);
        assert_eq!(summary.snv.false_positive, 0);
    }
    #[test]
    fn random_performance() {
        let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(2);
        let pools = pools(100, 400);
        for i in 0..50 {
            let caller = Caller::new(&mut rng, &format!("caller{}", i), &pools, &CallerConfig::random());
            assert!(PERFORMANCE_RANGE.contains(&caller.sensitivity()));
            assert!(PERFORMANCE_RANGE.contains(&caller.precision()));
        }
    }
    #[test]
    fn call_counts() {
        let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(3);
        let pools = pools(1000, 4000);
        let truth: HashSet<_> = pools.snvs_valid.iter().collect();
        for &(s, p) in &[(0.5, 0.5), (0.8, 0.9), (0.95, 0.6), (1.0, 1.0), (0.0, 0.7), (0.73, 0.51)] {
            let config = CallerConfig::new(Some(s), Some(p));
            let caller = Caller::new(&mut rng, "c", &pools, &config);
            let tp = caller.snvs().iter().filter(|v| truth.contains(v)).count();
            let fp = caller.snvs().len() - tp;
            let expected_tp = s * 1000f64;
            let expected_fp = (s * (1f64 - p) / p * 1000f64).min(4000f64);
            assert!((tp as f64 - expected_tp).abs() <= 1f64, "{} {}", tp, expected_tp);
            assert!((fp as f64 - expected_fp).abs() <= 1f64, "{} {}", fp, expected_fp);
            assert_eq!(caller.summary().snv.true_positive, tp);
            assert_eq!(caller.summary().snv.false_positive, fp);
            assert!(caller.snvs().windows(2).all(|w| w[0] < w[1]));
            assert!(caller.indels().windows(2).all(|w| w[0] < w[1]));
            if 0f64 < s {
                let precision = tp as f64 / (tp + fp) as f64;
                assert!((precision - p).abs() < 0.01, "{} {}", precision, p);
            }
        }
    }
    #[test]
    fn false_positive_capped() {
        let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(4);
        let pools = pools(1000, 50);
        let caller = Caller::new(&mut rng, "c", &pools, &CallerConfig::new(Some(0.9), Some(0.5)));
        assert_eq!(caller.summary().snv.false_positive, 50);
        assert_eq!(caller.snvs().len(), 900 + 50);
        // Degenerate precision: everything in the decoy pool is called.
        let caller = Caller::new(&mut rng, "c", &pools, &CallerConfig::new(Some(0.9), Some(0.0)));
        assert_eq!(caller.summary().snv.false_positive, 50);
        let caller = Caller::new(&mut rng, "c", &pools, &CallerConfig::new(Some(0.0), Some(0.0)));
        assert!(caller.snvs().is_empty());
    }
    #[test]
    fn fractions_test() {
        let (tp, fp) = call_fractions(0.8, 0.8);
        assert!((tp - 0.8).abs() < 1e-10);
        assert!((fp - 0.2).abs() < 1e-10);
        let (_, fp) = call_fractions(1f64, 1f64);
        assert_eq!(fp, 0f64);
    }
}
