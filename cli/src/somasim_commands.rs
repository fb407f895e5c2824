use crate::pipeline::{self, PipelineConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "somasim")]
#[command(author = "Bansho Masutani<ban-m@g.ecc.u-tokyo.ac.jp>")]
#[command(version = "0.1")]
#[command(about = "Generate synthetic somatic variants on a reference and simulate imperfect callers on them.")]
pub struct Args {
    /// Reference genome (FASTA). Only chromosomes 1-21, X, and Y are used.
    #[arg(required_unless_present = "profile")]
    pub genome: Option<PathBuf>,
    /// Number of synthetic somatic SNVs.
    #[arg(short = 's', long = "num_snvs", default_value_t = pipeline::DEFAULT_NUM_SNVS)]
    pub num_snvs: usize,
    /// Number of synthetic somatic indels.
    #[arg(short = 'i', long = "num_indels", default_value_t = pipeline::DEFAULT_NUM_INDELS)]
    pub num_indels: usize,
    /// Maximum indel size.
    #[arg(short = 'm', long = "max_indel_size", default_value_t = pipeline::DEFAULT_MAX_INDEL_SIZE)]
    pub max_indel_size: usize,
    /// Number of simulated callers.
    #[arg(short = 'c', long = "num_callers", default_value_t = pipeline::DEFAULT_NUM_CALLERS)]
    pub num_callers: usize,
    /// Output directory. It should exist.
    #[arg(short = 'd', long = "out_dir", default_value = ".")]
    pub out_dir: PathBuf,
    /// Set the seed of a pseudorandom number generator.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write the summary of the callers in JSON.
    #[arg(long, value_name = "JSON")]
    pub summary: Option<PathBuf>,
    /// Read all the parameters from a TOML profile instead.
    #[arg(long, value_name = "TOML")]
    pub profile: Option<PathBuf>,
    /// Debug mode.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// The configuration of the run. A profile, if given, takes precedence over the other options
    /// except for the verbosity.
    pub fn to_config(&self) -> std::io::Result<PipelineConfig> {
        if let Some(profile) = self.profile.as_ref() {
            let mut config = pipeline::load_profile(profile)?;
            config.verbose = config.verbose.max(self.verbose as usize);
            return Ok(config);
        }
        let genome = self.genome.clone().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "no reference genome given")
        })?;
        Ok(PipelineConfig {
            genome,
            num_snvs: self.num_snvs,
            num_indels: self.num_indels,
            max_indel_size: self.max_indel_size,
            num_callers: self.num_callers,
            out_dir: self.out_dir.clone(),
            seed: self.seed,
            summary: self.summary.clone(),
            verbose: self.verbose as usize,
        })
    }
}
