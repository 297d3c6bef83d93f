//! The on-disk cache format: a JSON snapshot of an alignment's sequences,
//! weights and profile positions, letting a reload skip guide-tree and
//! profile construction entirely.

use std::io::{Read, Write};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::constants::VERSION;
use crate::error::{Error, Result};
use crate::position::AlignmentPosition;

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    version: String,
    alphabet: Alphabet,
    sequences: IndexMap<String, String>,
    weights: Vec<f64>,
    positions: Vec<AlignmentPosition>,
}

/// The fields recovered from a cache file. `sequences` preserves the order
/// they appeared in the JSON document (an `IndexMap`, not a sorted map),
/// since `weights`/`positions` are parallel arrays keyed by that same
/// position.
pub struct Loaded {
    pub alphabet: Alphabet,
    pub sequence_by_name: Vec<(String, String)>,
    pub weights: Vec<f64>,
    pub positions: Vec<AlignmentPosition>,
}

/// Parses a cache file body. A body that isn't valid JSON, or that fails
/// schema validation, is reported as [`Error::InvalidCacheFormat`] so the
/// caller can fall back to FASTA parsing; a version mismatch against a
/// structurally valid body is reported separately.
pub fn load<R: Read>(mut reader: R) -> Result<Loaded> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;

    let file: CacheFile = serde_json::from_str(&contents)
        .map_err(|err| Error::InvalidCacheFormat(err.to_string()))?;

    if file.version != VERSION {
        return Err(Error::MismatchedCacheVersion {
            found: file.version,
            expected: VERSION.to_string(),
        });
    }

    if file.weights.len() != file.sequences.len() {
        return Err(Error::WeightCountMismatch {
            weights: file.weights.len(),
            sequences: file.sequences.len(),
        });
    }

    Ok(Loaded {
        alphabet: file.alphabet,
        sequence_by_name: file.sequences.into_iter().collect(),
        weights: file.weights,
        positions: file.positions,
    })
}

/// Writes a cache file for an alignment's current (possibly freshly built)
/// sequences, weights and positions.
pub fn save<W: Write>(
    mut writer: W,
    alphabet: Alphabet,
    sequence_by_name: &[(String, String)],
    weights: &[f64],
    positions: &[AlignmentPosition],
) -> Result<()> {
    let file = CacheFile {
        version: VERSION.to_string(),
        alphabet,
        sequences: sequence_by_name
            .iter()
            .map(|(n, s)| (n.clone(), s.clone()))
            .collect::<IndexMap<_, _>>(),
        weights: weights.to_vec(),
        positions: positions.to_vec(),
    };
    let body = serde_json::to_string_pretty(&file)
        .map_err(|err| Error::InvalidCacheFormat(err.to_string()))?;
    writer.write_all(body.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_json() {
        let err = load("not json at all".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidCacheFormat(_)));
    }

    #[test]
    fn rejects_mismatched_version() {
        let body = r#"{"version":"999","alphabet":"AMINO","sequences":{},"weights":[],"positions":[]}"#;
        let err = load(body.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MismatchedCacheVersion { .. }));
    }

    #[test]
    fn round_trips_a_small_alignment() {
        let sequences = vec![("a".to_string(), "AC-".to_string())];
        let weights = vec![1.0];
        let positions = vec![AlignmentPosition::new(
            vec![0, 1],
            vec![1.0, 0.0],
            vec![1.0, 0.0],
            1.0,
            1.0,
            1.0,
        )];

        let mut buf = Vec::new();
        save(&mut buf, Alphabet::Amino, &sequences, &weights, &positions).unwrap();

        let loaded = load(buf.as_slice()).unwrap();
        assert_eq!(loaded.alphabet, Alphabet::Amino);
        assert_eq!(loaded.sequence_by_name, sequences);
        assert_eq!(loaded.weights, weights);
        assert_eq!(loaded.positions, positions);
    }
}
