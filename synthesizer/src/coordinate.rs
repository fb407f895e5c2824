use definitions::Location;
use rand::Rng;
use std::io::{Error, ErrorKind};

/// Convert flat, genome-wide offsets into (chromosome index, offset) pairs.
/// `starts` should be sorted in ascending order, as the cursor on the chromosomes never goes back.
/// An offset equal to a cumulative size is the first base of the next chromosome.
pub fn locations_from_starts(
    starts: &[usize],
    cumulative_sizes: &[usize],
) -> std::io::Result<Vec<Location>> {
    let total = cumulative_sizes.last().copied().unwrap_or(0);
    let mut chrom_idx = 0;
    let mut last_size = 0;
    let mut prev_start = 0;
    let mut locations = Vec::with_capacity(starts.len());
    for &start in starts {
        if start < prev_start {
            let msg = format!("offsets are not sorted: {} after {}", start, prev_start);
            return Err(Error::new(ErrorKind::InvalidInput, msg));
        }
        if total <= start {
            let msg = format!("offset {} is out of range (genome size {})", start, total);
            return Err(Error::new(ErrorKind::InvalidInput, msg));
        }
        while cumulative_sizes[chrom_idx] <= start {
            last_size = cumulative_sizes[chrom_idx];
            chrom_idx += 1;
        }
        locations.push(Location::new(chrom_idx, start - last_size));
        prev_start = start;
    }
    Ok(locations)
}

/// Pick `num` distinct offsets in `0..total_len` uniformly at random, sorted in ascending order.
pub fn sample_starts<R: Rng>(rng: &mut R, total_len: usize, num: usize) -> std::io::Result<Vec<usize>> {
    if total_len < num {
        let msg = format!(
            "cannot sample {} positions from a genome of {} bases",
            num, total_len
        );
        return Err(Error::new(ErrorKind::InvalidInput, msg));
    }
    let mut starts = rand::seq::index::sample(rng, total_len, num).into_vec();
    starts.sort_unstable();
    Ok(starts)
}
