//! Writers for the calls of a [Caller](crate::caller::Caller).
//!
//! Two formats:
//! - A minimal VCF, with the name and the performance of the caller in the header.
//! - The BED-like input of BamSurgeon. Despite the name, positions are 1-based as in VCF.
//!   SNV: `chrom pos pos vaf alt`, indel: `chrom start end vaf INS|DEL bases`.
use crate::caller::Caller;
use definitions::Variant;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Binomial, Distribution};
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Clonal fractions a synthetic variant is drawn from.
pub const CLONE_VAFS: [f64; 3] = [0.2, 0.33, 0.5];
/// Depth used to perturb the clonal fraction.
pub const VAF_TRIALS: u64 = 30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VariantClass {
    Snv,
    Indel,
    All,
}

impl VariantClass {
    pub fn has_snvs(&self) -> bool {
        matches!(self, VariantClass::Snv | VariantClass::All)
    }
    pub fn has_indels(&self) -> bool {
        matches!(self, VariantClass::Indel | VariantClass::All)
    }
}

/// Truncate to two decimal places.
fn truncate_2(x: f64) -> f64 {
    (x * 100f64) as i64 as f64 / 100f64
}

/// Sample a variant allele fraction: one of the clonal fractions, observed at a depth of [VAF_TRIALS](VAF_TRIALS).
/// The result has (at most) three decimal places.
pub fn sample_vaf<R: Rng>(rng: &mut R) -> f64 {
    let base_vaf = *CLONE_VAFS.choose(rng).unwrap_or(&CLONE_VAFS[0]);
    // The probabilities are constants in (0,1).
    let binom = Binomial::new(VAF_TRIALS, base_vaf).unwrap();
    let count = binom.sample(rng);
    (count as f64 / VAF_TRIALS as f64 * 1000f64).floor() / 1000f64
}

impl Caller {
    /// The calls of the given class, merged and sorted.
    pub fn variants(&self, class: VariantClass) -> Vec<&Variant> {
        let mut variants: Vec<_> = vec![];
        if class.has_snvs() {
            variants.extend(self.snvs().iter());
        }
        if class.has_indels() {
            variants.extend(self.indels().iter());
        }
        variants.sort();
        variants
    }
    pub fn to_vcf<W: Write>(&self, mut wtr: W, class: VariantClass) -> std::io::Result<()> {
        // `{:?}` keeps the trailing `.0`, as in `1.0`.
        writeln!(wtr, "##fileformat=VCFv4.1")?;
        writeln!(wtr, "##caller_name={}", self.name())?;
        writeln!(wtr, "##sensitivity={:?}", truncate_2(self.sensitivity()))?;
        writeln!(wtr, "##precision={:?}", truncate_2(self.precision()))?;
        writeln!(wtr, "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO")?;
        for variant in self.variants(class) {
            let refr = String::from_utf8_lossy(variant.ref_allele());
            let alt = String::from_utf8_lossy(variant.alt_allele());
            let (chrom, pos) = (variant.chrom(), variant.pos());
            writeln!(wtr, "{}\t{}\t.\t{}\t{}\t.\t.\t.", chrom, pos, refr, alt)?;
        }
        Ok(())
    }
    pub fn to_bamsurgeon_bed<W: Write, R: Rng>(
        &self,
        mut wtr: W,
        rng: &mut R,
        class: VariantClass,
    ) -> std::io::Result<()> {
        for variant in self.variants(class) {
            let (chrom, pos) = (variant.chrom(), variant.pos());
            let vaf = sample_vaf(rng);
            let (refr, alt) = (variant.ref_allele(), variant.alt_allele());
            match variant.indel_kind() {
                None => {
                    let alt = String::from_utf8_lossy(alt);
                    writeln!(wtr, "{}\t{}\t{}\t{:?}\t{}", chrom, pos, pos, vaf, alt)?;
                }
                Some(kind) => {
                    let end = pos + refr.len();
                    let bases = match refr.len() < alt.len() {
                        true => &alt[1..],
                        false => &refr[1..],
                    };
                    let bases = String::from_utf8_lossy(bases);
                    let tag = kind.tag();
                    writeln!(wtr, "{}\t{}\t{}\t{:?}\t{}\t{}", chrom, pos, end, vaf, tag, bases)?;
                }
            }
        }
        Ok(())
    }
    pub fn write_vcf<P: AsRef<Path>>(&self, path: P, class: VariantClass) -> std::io::Result<()> {
        debug!("Writing {:?}", path.as_ref());
        let mut wtr = std::fs::File::create(path).map(BufWriter::new)?;
        self.to_vcf(&mut wtr, class)?;
        wtr.flush()
    }
    pub fn write_bed<P: AsRef<Path>, R: Rng>(
        &self,
        path: P,
        rng: &mut R,
        class: VariantClass,
    ) -> std::io::Result<()> {
        debug!("Writing {:?}", path.as_ref());
        let mut wtr = std::fs::File::create(path).map(BufWriter::new)?;
        self.to_bamsurgeon_bed(&mut wtr, rng, class)?;
        wtr.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caller::{CallerConfig, VariantPools};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;
    fn indel(chrom: &str, pos: usize, refr: &str, alt: &str) -> Variant {
        Variant::Indel {
            chrom: chrom.to_string(),
            pos,
            refr: refr.to_string(),
            alt: alt.to_string(),
        }
    }
    fn snv(chrom: &str, pos: usize, refr: u8, alt: u8) -> Variant {
        Variant::Snv {
            chrom: chrom.to_string(),
            pos,
            refr,
            alt,
        }
    }
    fn truth() -> Caller {
        let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(0);
        let snvs = vec![snv("1", 5, b'A', b'G'), snv("2", 3, b'T', b'C')];
        let indels = vec![indel("1", 10, "A", "ACGT"), indel("X", 7, "GTT", "G")];
        Caller::truth(&mut rng, "truth", &snvs, &indels)
    }
    fn to_string<F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>>(f: F) -> String {
        let mut buf = vec![];
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }
    #[test]
    fn vcf_test() {
        let caller = truth();
        let vcf = to_string(|w| caller.to_vcf(w, VariantClass::All));
        let lines: Vec<_> = vcf.lines().collect();
        assert_eq!(
            lines,
            vec![
                "##fileformat=VCFv4.1",
                "##caller_name=truth",
                "##sensitivity=1.0",
                "##precision=1.0",
                "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO",
                "1\t5\t.\tA\tG\t.\t.\t.",
                "1\t10\t.\tA\tACGT\t.\t.\t.",
                "2\t3\t.\tT\tC\t.\t.\t.",
                "X\t7\t.\tGTT\tG\t.\t.\t.",
            ]
        );
        let vcf = to_string(|w| caller.to_vcf(w, VariantClass::Indel));
        assert_eq!(vcf.lines().filter(|l| !l.starts_with('#')).count(), 2);
        let vcf = to_string(|w| caller.to_vcf(w, VariantClass::Snv));
        assert!(vcf.ends_with("2\t3\t.\tT\tC\t.\t.\t.\n"));
    }
    #[test]
    fn vcf_is_deterministic() {
        let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(11);
        let pools = VariantPools::new(
            (1..100).map(|i| snv("1", i, b'A', b'T')).collect(),
            (1..300).map(|i| snv("3", i, b'A', b'T')).collect(),
            vec![],
            vec![],
        );
        let caller = Caller::new(&mut rng, "caller0", &pools, &CallerConfig::random());
        let first = to_string(|w| caller.to_vcf(w, VariantClass::Snv));
        let second = to_string(|w| caller.to_vcf(w, VariantClass::Snv));
        assert_eq!(first, second);
    }
    #[test]
    fn header_truncation() {
        assert_eq!(format!("{:?}", truncate_2(0.739)), "0.73");
        assert_eq!(format!("{:?}", truncate_2(0.5)), "0.5");
        assert_eq!(format!("{:?}", truncate_2(0.9499)), "0.94");
        assert_eq!(format!("{:?}", truncate_2(1f64)), "1.0");
    }
    #[test]
    fn bed_test() {
        let caller = truth();
        let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(1);
        let bed = to_string(|w| caller.to_bamsurgeon_bed(w, &mut rng, VariantClass::Snv));
        let lines: Vec<Vec<_>> = bed.lines().map(|l| l.split('\t').collect()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 5);
        assert_eq!((lines[0][0], lines[0][1], lines[0][2], lines[0][4]), ("1", "5", "5", "G"));
        assert_eq!((lines[1][0], lines[1][1], lines[1][2], lines[1][4]), ("2", "3", "3", "C"));
        let bed = to_string(|w| caller.to_bamsurgeon_bed(w, &mut rng, VariantClass::Indel));
        let lines: Vec<Vec<_>> = bed.lines().map(|l| l.split('\t').collect()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 6);
        assert_eq!((lines[0][0], lines[0][1], lines[0][2]), ("1", "10", "11"));
        assert_eq!((lines[0][4], lines[0][5]), ("INS", "CGT"));
        assert_eq!((lines[1][0], lines[1][1], lines[1][2]), ("X", "7", "10"));
        assert_eq!((lines[1][4], lines[1][5]), ("DEL", "TT"));
        for line in lines.iter() {
            let vaf: f64 = line[3].parse().unwrap();
            assert!((0f64..=1f64).contains(&vaf));
        }
    }
    #[test]
    fn vaf_test() {
        let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(7);
        let vafs: Vec<_> = (0..3_000).map(|_| sample_vaf(&mut rng)).collect();
        for &vaf in vafs.iter() {
            assert!((0f64..=1f64).contains(&vaf));
            let scaled = vaf * 1000f64;
            assert!((scaled - scaled.round()).abs() < 1e-6, "{}", vaf);
            let decimals = format!("{:?}", vaf).split('.').nth(1).map_or(0, |d| d.len());
            assert!(decimals <= 3, "{}", vaf);
        }
        let mean = vafs.iter().sum::<f64>() / vafs.len() as f64;
        let expected = CLONE_VAFS.iter().sum::<f64>() / 3f64;
        assert!((mean - expected).abs() < 0.02, "{} {}", mean, expected);
    }
}
