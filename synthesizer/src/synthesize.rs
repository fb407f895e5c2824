//! Synthesize candidate SNVs and indels at random positions of the reference.
//!
//! Candidates on ambiguous bases (N, IUPAC codes, soft-masked bases) are silently dropped,
//! so the returned pools may be smaller than requested. Callers oversample to compensate.
use crate::coordinate::{locations_from_starts, sample_starts};
use definitions::{is_canonical_base, Genome, Location, Variant, BASES};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Pareto};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndelConfig {
    /// The longest indel to be generated.
    pub max_size: usize,
}

impl IndelConfig {
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }
}

impl std::default::Default for IndelConfig {
    fn default() -> Self {
        Self { max_size: 100 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Number of positions to try for SNVs.
    pub snv_num: usize,
    /// Number of positions to try for indels.
    pub indel_num: usize,
    pub indel: IndelConfig,
}

impl SynthesisConfig {
    pub fn new(snv_num: usize, indel_num: usize, max_indel_size: usize) -> Self {
        Self {
            snv_num,
            indel_num,
            indel: IndelConfig::new(max_indel_size),
        }
    }
}

/// Sample positions for SNVs and indels independently and synthesize variants on them.
/// Both returned pools are sorted.
pub fn variants_from_genome<R: Rng>(
    rng: &mut R,
    genome: &Genome,
    config: &SynthesisConfig,
) -> std::io::Result<(Vec<Variant>, Vec<Variant>)> {
    let cum_sizes = genome.cumulative_sizes();
    let total_len = genome.total_len();
    let snv_starts = sample_starts(rng, total_len, config.snv_num)?;
    let indel_starts = sample_starts(rng, total_len, config.indel_num)?;
    let snv_locations = locations_from_starts(&snv_starts, &cum_sizes)?;
    let indel_locations = locations_from_starts(&indel_starts, &cum_sizes)?;
    let mut snvs = snvs_from_locations(rng, genome, &snv_locations);
    let mut indels = indels_from_locations(rng, genome, &indel_locations, &config.indel);
    snvs.sort();
    indels.sort();
    debug!("SYNTH\tSNV\t{}\t{}", config.snv_num, snvs.len());
    debug!("SYNTH\tINDEL\t{}\t{}", config.indel_num, indels.len());
    Ok((snvs, indels))
}

/// Substitute the reference base at each location with one of the other three bases.
pub fn snvs_from_locations<R: Rng>(
    rng: &mut R,
    genome: &Genome,
    locations: &[Location],
) -> Vec<Variant> {
    let snvs: Vec<_> = locations
        .iter()
        .filter_map(|loc| {
            let chr = &genome.chromosomes[loc.chrom_idx];
            let refr = chr.seq()[loc.offset];
            if !is_canonical_base(refr) {
                return None;
            }
            let others: Vec<u8> = BASES.iter().copied().filter(|&b| b != refr).collect();
            let alt = *others.choose(rng)?;
            Some(Variant::Snv {
                chrom: chr.name.clone(),
                pos: loc.offset + 1,
                refr,
                alt,
            })
        })
        .collect();
    trace!("SNV\tDropped\t{}", locations.len() - snvs.len());
    snvs
}

/// Length of an indel. Heavy-tailed: most are a few bases, some are long.
pub fn sample_indel_length<R: Rng>(rng: &mut R, max_size: usize) -> usize {
    // Pareto with scale 1 is always >= 1.
    let pareto = Pareto::new(1f64, 2f64).unwrap();
    let length = pareto.sample(rng).floor();
    if (max_size as f64) < length {
        max_size
    } else {
        length as usize
    }
}

pub fn random_seq<R: Rng>(rng: &mut R, length: usize) -> Vec<u8> {
    (0..length).filter_map(|_| BASES.choose(rng)).copied().collect()
}

/// Introduce an insertion or a deletion (with equal probability) right after each location.
/// The base at the location is the anchor, shared by the reference and the alternative allele.
pub fn indels_from_locations<R: Rng>(
    rng: &mut R,
    genome: &Genome,
    locations: &[Location],
    config: &IndelConfig,
) -> Vec<Variant> {
    let indels: Vec<_> = locations
        .iter()
        .filter_map(|loc| {
            let chr = &genome.chromosomes[loc.chrom_idx];
            let seq = chr.seq();
            let length = sample_indel_length(rng, config.max_size);
            let anchor = seq[loc.offset];
            let (refr, alt) = if rng.gen_bool(0.5) {
                let mut alt = vec![anchor];
                alt.extend(random_seq(rng, length));
                (vec![anchor], alt)
            } else {
                let end = (loc.offset + length + 1).min(seq.len());
                (seq[loc.offset..end].to_vec(), vec![anchor])
            };
            let is_valid = |xs: &[u8]| xs.iter().all(|&b| is_canonical_base(b));
            if refr.len() == alt.len() || !is_valid(&refr) || !is_valid(&alt) {
                return None;
            }
            // Both alleles are ACGT only.
            let refr = String::from_utf8(refr).ok()?;
            let alt = String::from_utf8(alt).ok()?;
            Some(Variant::Indel {
                chrom: chr.name.clone(),
                pos: loc.offset + 1,
                refr,
                alt,
            })
        })
        .collect();
    trace!("INDEL\tDropped\t{}", locations.len() - indels.len());
    indels
}
