use definitions::Variant;
use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle the candidates, take the first `nvalid` as the truth and the rest as the decoys.
/// Both are returned in sorted order.
/// If there are fewer than `nvalid` candidates, all of them become the truth.
pub fn select_valid<R: Rng>(
    rng: &mut R,
    mut variants: Vec<Variant>,
    nvalid: usize,
) -> (Vec<Variant>, Vec<Variant>) {
    if variants.len() < nvalid {
        warn!(
            "Only {} candidates remained while {} truth variants were requested.",
            variants.len(),
            nvalid
        );
    }
    variants.shuffle(rng);
    let mut invalid = variants.split_off(nvalid.min(variants.len()));
    let mut valid = variants;
    valid.sort();
    invalid.sort();
    debug!("SPLIT\t{}\t{}", valid.len(), invalid.len());
    (valid, invalid)
}
