use definitions::{Chromosome, Genome};
use std::io::BufRead;
use std::path::Path;

/// Parse a fasta stream into a genome. No validation on the sequence is done here.
/// Records without a (non-empty) header are named `seq{n}`, where n is the 1-based index of the record in the output.
/// Records with empty sequence are discarded.
pub fn parse_fasta<R: BufRead>(reader: R) -> std::io::Result<Genome> {
    let mut chromosomes: Vec<Chromosome> = vec![];
    let mut name: Option<String> = None;
    let mut seq: Vec<u8> = vec![];
    for line in reader.lines() {
        let line = line?;
        match line.strip_prefix('>') {
            Some(header) => {
                push_record(&mut chromosomes, name.take(), std::mem::take(&mut seq));
                name = Some(header.trim().to_string());
            }
            None => seq.extend(line.trim().as_bytes()),
        }
    }
    push_record(&mut chromosomes, name, seq);
    Ok(Genome::new(chromosomes))
}

fn push_record(chromosomes: &mut Vec<Chromosome>, header: Option<String>, seq: Vec<u8>) {
    if seq.is_empty() {
        return;
    }
    let name = header
        .as_deref()
        .and_then(|h| h.split_whitespace().next())
        .map(|id| id.to_string())
        .unwrap_or_else(|| format!("seq{}", chromosomes.len() + 1));
    chromosomes.push(Chromosome::new(name, seq));
}

/// Open the reference and keep the canonical chromosomes only.
pub fn read_genome<P: AsRef<Path>>(path: P) -> std::io::Result<Genome> {
    debug!("Opening {:?}", path.as_ref());
    let reader = std::fs::File::open(path).map(std::io::BufReader::new)?;
    let genome = parse_fasta(reader)?;
    let total = genome.len();
    let genome = genome.filter_canonical();
    debug!("GENOME\tRecords\t{}", total);
    debug!("GENOME\tCanonical\t{}", genome.len());
    debug!("GENOME\tBasePair\t{}", genome.total_len());
    if genome.is_empty() {
        warn!("No canonical chromosome found in the reference.");
    }
    Ok(genome)
}
