//! Definitions -- A tiny interface for the synthetic variant benchmark.
//! The reference genome, the variants synthesized on it, and the report of each simulated caller
//! are all plain data here, so that they can be passed between crates or dumped as JSON.

use serde::{Deserialize, Serialize};

/// The four canonical bases. Any other byte (N, IUPAC codes, lowercase) is treated as ambiguous.
pub const BASES: &[u8; 4] = b"ACGT";

/// The chromosomes kept from the input reference, in the order they should be reported.
pub const CANONICAL_CHROMOSOMES: [&str; 23] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "X", "Y",
];

pub fn is_canonical_base(base: u8) -> bool {
    BASES.contains(&base)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chromosome {
    /// Name of the chromosome. It is the first token of the header in the fasta file.
    pub name: String,
    /// Sequence. It is NOT validated, so it may contain N or other ambiguity codes.
    pub seq: Vec<u8>,
}

impl Chromosome {
    pub fn new(name: String, seq: Vec<u8>) -> Self {
        Self { name, seq }
    }
    pub fn seq(&self) -> &[u8] {
        &self.seq
    }
    pub fn len(&self) -> usize {
        self.seq.len()
    }
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Genome {
    pub chromosomes: Vec<Chromosome>,
}

impl Genome {
    pub fn new(chromosomes: Vec<Chromosome>) -> Self {
        Self { chromosomes }
    }
    /// Retain only the chromosomes named in [CANONICAL_CHROMOSOMES](CANONICAL_CHROMOSOMES).
    /// The input order is kept as-is.
    pub fn filter_canonical(mut self) -> Self {
        self.chromosomes
            .retain(|chr| CANONICAL_CHROMOSOMES.contains(&chr.name.as_str()));
        self
    }
    /// Running total of the chromosome lengths.
    pub fn cumulative_sizes(&self) -> Vec<usize> {
        self.chromosomes
            .iter()
            .scan(0, |acc, chr| {
                *acc += chr.len();
                Some(*acc)
            })
            .collect()
    }
    pub fn total_len(&self) -> usize {
        self.chromosomes.iter().map(|chr| chr.len()).sum()
    }
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }
}

/// A position in the genome: the index of the chromosome and the 0-based offset inside it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub chrom_idx: usize,
    pub offset: usize,
}

impl Location {
    pub fn new(chrom_idx: usize, offset: usize) -> Self {
        Self { chrom_idx, offset }
    }
}

/// A synthesized variant. Positions are 1-based, like VCF.
/// Both alleles consist only of A, C, G, and T.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Variant {
    Snv {
        chrom: String,
        pos: usize,
        refr: u8,
        alt: u8,
    },
    /// Exactly one of the alleles is the single anchor base.
    Indel {
        chrom: String,
        pos: usize,
        refr: String,
        alt: String,
    },
}

impl Variant {
    pub fn chrom(&self) -> &str {
        match self {
            Variant::Snv { chrom, .. } | Variant::Indel { chrom, .. } => chrom,
        }
    }
    pub fn pos(&self) -> usize {
        match *self {
            Variant::Snv { pos, .. } | Variant::Indel { pos, .. } => pos,
        }
    }
    pub fn ref_allele(&self) -> &[u8] {
        match self {
            Variant::Snv { refr, .. } => std::slice::from_ref(refr),
            Variant::Indel { refr, .. } => refr.as_bytes(),
        }
    }
    pub fn alt_allele(&self) -> &[u8] {
        match self {
            Variant::Snv { alt, .. } => std::slice::from_ref(alt),
            Variant::Indel { alt, .. } => alt.as_bytes(),
        }
    }
    pub fn is_snv(&self) -> bool {
        matches!(self, Variant::Snv { .. })
    }
    pub fn is_indel(&self) -> bool {
        matches!(self, Variant::Indel { .. })
    }
    /// Insertion or deletion. `None` for SNVs.
    pub fn indel_kind(&self) -> Option<IndelKind> {
        match self {
            Variant::Snv { .. } => None,
            Variant::Indel { refr, alt, .. } if refr.len() < alt.len() => {
                Some(IndelKind::Insertion)
            }
            Variant::Indel { .. } => Some(IndelKind::Deletion),
        }
    }
    fn sort_key(&self) -> (&str, usize, &[u8], &[u8]) {
        (self.chrom(), self.pos(), self.ref_allele(), self.alt_allele())
    }
}

// Chromosome names compare as strings, so "10" comes before "2".
impl Ord for Variant {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Variant {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let refr = String::from_utf8_lossy(self.ref_allele());
        let alt = String::from_utf8_lossy(self.alt_allele());
        write!(f, "{}\t{}\t{}\t{}", self.chrom(), self.pos(), refr, alt)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IndelKind {
    Insertion,
    Deletion,
}

impl IndelKind {
    pub fn tag(&self) -> &'static str {
        match self {
            IndelKind::Insertion => "INS",
            IndelKind::Deletion => "DEL",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Tally {
    pub true_positive: usize,
    pub false_positive: usize,
}

/// The report of a simulated caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallerSummary {
    pub name: String,
    pub sensitivity: f64,
    pub precision: f64,
    pub snv: Tally,
    pub indel: Tally,
}
