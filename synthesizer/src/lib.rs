pub mod caller;
pub mod coordinate;
pub mod genome;
pub mod output;
pub mod split;
pub mod synthesize;
#[macro_use]
extern crate log;

pub use caller::{Caller, CallerConfig, VariantPools};
pub use output::VariantClass;
pub use synthesize::{IndelConfig, SynthesisConfig};

/// How many candidates are synthesized per requested truth variant.
/// The surplus absorbs the candidates dropped at ambiguous bases and becomes the decoy pool.
pub const OVERSAMPLE: usize = 5;
