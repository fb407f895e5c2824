//! Pipelines -- the whole pipeline of somasim.
//!
//! This module generates a truth set of somatic variants on a reference genome and
//! the calls of several simulated callers against it.
use definitions::CallerSummary;
use log::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Error, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use synthesizer::{
    genome::read_genome, split::select_valid, synthesize::variants_from_genome, Caller,
    CallerConfig, SynthesisConfig, VariantClass, VariantPools, OVERSAMPLE,
};

/// The configuration of the pipeline.
/// This struct is a comprehensive list of the parameters that can be
/// set by a user, either by the command line or by a TOML profile.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// The path to the reference genome (FASTA).
    pub genome: PathBuf,
    /// The number of the truth SNVs.
    #[serde(default = "default_num_snvs")]
    pub num_snvs: usize,
    /// The number of the truth indels.
    #[serde(default = "default_num_indels")]
    pub num_indels: usize,
    #[serde(default = "default_max_indel_size")]
    pub max_indel_size: usize,
    /// The number of the simulated (imperfect) callers.
    #[serde(default = "default_num_callers")]
    pub num_callers: usize,
    /// The path to the output directory. It should exist.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// If not given, a seed is drawn from the entropy of the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    /// If given, the summary of the callers is written to this path in JSON.
    #[serde(default)]
    pub summary: Option<PathBuf>,
    #[serde(default)]
    pub verbose: usize,
}

pub const DEFAULT_NUM_SNVS: usize = 3000;
pub const DEFAULT_NUM_INDELS: usize = 300;
pub const DEFAULT_MAX_INDEL_SIZE: usize = 100;
pub const DEFAULT_NUM_CALLERS: usize = 5;

fn default_num_snvs() -> usize {
    DEFAULT_NUM_SNVS
}
fn default_num_indels() -> usize {
    DEFAULT_NUM_INDELS
}
fn default_max_indel_size() -> usize {
    DEFAULT_MAX_INDEL_SIZE
}
fn default_num_callers() -> usize {
    DEFAULT_NUM_CALLERS
}
fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

impl PipelineConfig {
    pub fn new<P: AsRef<Path>>(genome: P) -> Self {
        Self {
            genome: genome.as_ref().to_path_buf(),
            num_snvs: DEFAULT_NUM_SNVS,
            num_indels: DEFAULT_NUM_INDELS,
            max_indel_size: DEFAULT_MAX_INDEL_SIZE,
            num_callers: DEFAULT_NUM_CALLERS,
            out_dir: default_out_dir(),
            seed: None,
            summary: None,
            verbose: 0,
        }
    }
}

pub fn load_profile<P: AsRef<Path>>(path: P) -> std::io::Result<PipelineConfig> {
    debug!("Opening {:?}", path.as_ref());
    let mut rdr = std::fs::File::open(path).map(std::io::BufReader::new)?;
    let mut file = String::new();
    rdr.read_to_string(&mut file)?;
    toml::from_str(&file).map_err(|why| Error::new(ErrorKind::InvalidData, why))
}

pub fn log_level(verbose: usize) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn run_pipeline(config: &PipelineConfig) -> std::io::Result<()> {
    let PipelineConfig {
        genome,
        num_snvs,
        num_indels,
        max_indel_size,
        num_callers,
        out_dir,
        seed,
        summary,
        verbose: _,
    } = config.clone();
    if !out_dir.is_dir() {
        let msg = format!("output directory {:?} does not exist", out_dir);
        return Err(Error::new(ErrorKind::NotFound, msg));
    }
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("PIPELINE\tSeed\t{}", seed);
    let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(seed);
    let genome = read_genome(&genome)?;
    // Candidates.
    let synth_config = SynthesisConfig::new(
        OVERSAMPLE * num_snvs,
        OVERSAMPLE * num_indels,
        max_indel_size,
    );
    let (snvs, indels) = variants_from_genome(&mut rng, &genome, &synth_config)?;
    let (snvs_valid, snvs_invalid) = select_valid(&mut rng, snvs, num_snvs);
    let (indels_valid, indels_invalid) = select_valid(&mut rng, indels, num_indels);
    info!("PIPELINE\tSNV\t{}\t{}", snvs_valid.len(), snvs_invalid.len());
    info!("PIPELINE\tINDEL\t{}\t{}", indels_valid.len(), indels_invalid.len());
    let pools = VariantPools::new(snvs_valid, snvs_invalid, indels_valid, indels_invalid);
    // Truth.
    let truth = Caller::truth(&mut rng, "truth", &pools.snvs_valid, &pools.indels_valid);
    truth.write_vcf(out_dir.join("truth.vcf"), VariantClass::All)?;
    truth.write_bed(out_dir.join("truth.snv.bed"), &mut rng, VariantClass::Snv)?;
    truth.write_bed(out_dir.join("truth.indel.bed"), &mut rng, VariantClass::Indel)?;
    let mut summaries: Vec<CallerSummary> = vec![truth.summary()];
    // Callers.
    for i in 0..num_callers {
        let name = format!("caller{}", i);
        let caller = Caller::new(&mut rng, &name, &pools, &CallerConfig::random());
        let snv_path = out_dir.join(format!("{}.snv.vcf", name));
        caller.write_vcf(snv_path, VariantClass::Snv)?;
        let indel_path = out_dir.join(format!("{}.indel.vcf", name));
        caller.write_vcf(indel_path, VariantClass::Indel)?;
        info!(
            "PIPELINE\t{}\t{:.3}\t{:.3}",
            name,
            caller.sensitivity(),
            caller.precision()
        );
        summaries.push(caller.summary());
    }
    if let Some(path) = summary {
        debug!("Writing {:?}", path);
        let mut wtr = std::fs::File::create(path).map(BufWriter::new)?;
        serde_json::ser::to_writer_pretty(&mut wtr, &summaries)?;
        writeln!(wtr)?;
    }
    Ok(())
}
