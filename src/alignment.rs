//! Multiple sequence alignments: construction, lazily-computed profiles,
//! weights and guide trees, and the operations that merge two alignments
//! into one via a computed path.

use std::cell::RefCell;
use std::collections::HashMap;

use itertools::Itertools;

use crate::align::global_align;
use crate::alphabet::{Alphabet, AMINO_ORDER, DNA_ORDER};
use crate::constants::{AMINO_SCORE_MATRIX, ID_GUARD, LENGTH_GUARD, OTHER_SCORE_MATRIX};
use crate::distance::calculate_distance;
use crate::error::{Error, Result};
use crate::path::{Modification, Path};
use crate::position::AlignmentPosition;
use crate::sequence::Sequence;
use crate::tree::{flat_index, Tree};

/// A multiple sequence alignment: a set of equal-length sequences sharing
/// an alphabet, plus lazily-computed weights, profile positions and guide
/// tree.
///
/// The alphabet of a freshly constructed alignment is always [`Alphabet::Amino`],
/// regardless of the sequence content; callers that want DNA/RNA handling
/// must opt in explicitly with [`Alignment::with_alphabet`]. This mirrors a
/// quirk of the tool this behaviour is modeled on and is kept deliberately.
pub struct Alignment {
    column_count: usize,
    alphabet: Alphabet,
    names: Vec<String>,
    name_index: HashMap<String, usize>,
    sequences: Vec<Sequence>,

    tree: RefCell<Option<Tree>>,
    weights: RefCell<Option<Vec<f64>>>,
    positions: RefCell<Option<Vec<AlignmentPosition>>>,
}

impl Alignment {
    /// Builds an alignment from a name-ordered list of (name, sequence)
    /// pairs. All sequences must share the same length.
    pub fn new(sequence_by_name: Vec<(String, String)>) -> Result<Self> {
        Self::with_cache(sequence_by_name, None, None)
    }

    /// Builds an alignment, optionally trusting precomputed weights and
    /// positions (as loaded from a cache file) instead of deriving them.
    /// The alphabet defaults to [`Alphabet::Amino`], per [`Alignment::new`].
    pub fn with_cache(
        sequence_by_name: Vec<(String, String)>,
        weights: Option<Vec<f64>>,
        positions: Option<Vec<AlignmentPosition>>,
    ) -> Result<Self> {
        Self::with_cache_and_alphabet(sequence_by_name, Alphabet::Amino, weights, positions)
    }

    /// As [`Alignment::with_cache`], but with an explicit alphabet rather
    /// than the hard-coded AMINO default. Used when reloading a cache file
    /// that recorded its own alphabet, so the cached weights/positions
    /// (which were computed under that alphabet) stay valid.
    pub fn with_cache_and_alphabet(
        sequence_by_name: Vec<(String, String)>,
        alphabet: Alphabet,
        weights: Option<Vec<f64>>,
        positions: Option<Vec<AlignmentPosition>>,
    ) -> Result<Self> {
        if sequence_by_name.is_empty() {
            return Err(Error::EmptyAlignment);
        }
        let column_count = sequence_by_name[0].1.chars().count();
        for (name, seq) in &sequence_by_name {
            let len = seq.chars().count();
            if len != column_count {
                return Err(Error::InconsistentLengths {
                    name: name.clone(),
                    expected: column_count,
                    actual: len,
                });
            }
        }
        if let Some(w) = &weights {
            if w.len() != sequence_by_name.len() {
                return Err(Error::WeightCountMismatch {
                    weights: w.len(),
                    sequences: sequence_by_name.len(),
                });
            }
        }
        if let Some(p) = &positions {
            if p.len() != column_count {
                return Err(Error::PositionCountMismatch {
                    positions: p.len(),
                    columns: column_count,
                });
            }
        }

        let mut names = Vec::with_capacity(sequence_by_name.len());
        let mut name_index = HashMap::with_capacity(sequence_by_name.len());
        let mut sequences = Vec::with_capacity(sequence_by_name.len());
        for (i, (name, seq)) in sequence_by_name.into_iter().enumerate() {
            name_index.insert(name.clone(), i);
            names.push(name);
            sequences.push(Sequence::from_string(&seq, alphabet));
        }

        Ok(Self {
            column_count,
            alphabet,
            names,
            name_index,
            sequences,
            tree: RefCell::new(None),
            weights: RefCell::new(weights),
            positions: RefCell::new(positions),
        })
    }

    /// Overrides the alphabet after construction, re-normalising sequences
    /// under the new alphabet's wildcard rules. Only invalidates cached
    /// positions, since those depend on the alphabet's score matrix and
    /// wildcard-splitting rules; cached weights/tree derive from
    /// `percentage_identity_pair`, which compares residue equality only and
    /// is alphabet-independent, so caller-supplied weights survive the
    /// switch instead of being silently recomputed from the guide tree.
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self.sequences = self
            .sequences
            .iter()
            .map(|s| Sequence::from_string(&s.to_string(), alphabet))
            .collect();
        self.positions = RefCell::new(None);
        self
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    pub fn get_sequence_by_name(&self, name: &str) -> Option<&Sequence> {
        self.name_index.get(name).map(|&i| &self.sequences[i])
    }

    /// The profile positions for each column, built lazily on first access.
    pub fn positions(&self) -> Vec<AlignmentPosition> {
        if self.positions.borrow().is_none() {
            let built = self.build_positions();
            *self.positions.borrow_mut() = Some(built);
        }
        self.positions.borrow().clone().unwrap()
    }

    /// The per-sequence weights, built lazily (via a guide tree) on first
    /// access.
    pub fn weights(&self) -> Vec<f64> {
        if self.weights.borrow().is_none() {
            let built = self.build_weights();
            *self.weights.borrow_mut() = Some(built);
        }
        self.weights.borrow().clone().unwrap()
    }

    pub fn sequence_weight(&self, index: usize) -> f64 {
        self.weights()[index]
    }

    fn build_weights(&self) -> Vec<f64> {
        if self.tree.borrow().is_none() {
            let built = tree_from_alignment(self);
            *self.tree.borrow_mut() = Some(built);
        }
        self.tree.borrow().as_ref().unwrap().get_weights()
    }

    fn build_positions(&self) -> Vec<AlignmentPosition> {
        let score_matrix: Vec<Vec<f64>> = match self.alphabet {
            Alphabet::Amino => AMINO_SCORE_MATRIX.iter().map(|r| r.to_vec()).collect(),
            Alphabet::Dna | Alphabet::Rna => {
                OTHER_SCORE_MATRIX.iter().map(|r| r.to_vec()).collect()
            }
        };
        let alphabet_size = self.alphabet.size();

        (0..self.column_count)
            .map(|column| {
                let counts = self.fractional_weighted_counts(column);
                let sort_order = indices_by_decreasing_value(&counts);
                let scores: Vec<f64> = (0..alphabet_size)
                    .map(|i| {
                        counts
                            .iter()
                            .zip(score_matrix[i].iter())
                            .map(|(c, m)| c * m)
                            .sum()
                    })
                    .collect();
                AlignmentPosition::new(
                    sort_order,
                    counts,
                    scores,
                    1.0 - self.column_ungapped_weight(column),
                    1.0 - self.gap_open_weight_total(column),
                    1.0 - self.gap_close_weight_total(column),
                )
            })
            .collect()
    }

    /// The percentage of non-gap positions at which two sequences agree,
    /// skipping any column where either has a gap.
    pub fn percentage_identity_pair(&self, i: usize, j: usize) -> f64 {
        let mut count = 0usize;
        let mut same = 0usize;
        for (a, b) in self.sequences[i].0.iter().zip(self.sequences[j].0.iter()) {
            if let (Some(x), Some(y)) = (a, b) {
                count += 1;
                if x == y {
                    same += 1;
                }
            }
        }
        if count == 0 {
            0.0
        } else {
            same as f64 / count as f64
        }
    }

    /// The total sequence weight of sequences with a gap at `column`.
    pub fn column_ungapped_weight(&self, column: usize) -> f64 {
        let weights = self.weights();
        self.sequences
            .iter()
            .enumerate()
            .filter(|(_, seq)| seq[column].is_none())
            .map(|(i, _)| weights[i])
            .sum()
    }

    /// Residue weight totals for a column: for each sequence contributing a
    /// character at `col_index`, spreads its sequence weight across the
    /// relevant `base_counts` slots (splitting for ambiguity wildcards),
    /// then normalises by the total contributing weight.
    pub fn fractional_weighted_counts(&self, col_index: usize) -> Vec<f64> {
        use crate::alphabet::is_wildcard;

        let alphabet_size = self.alphabet.size();
        let mut counts = vec![0.0; alphabet_size];
        let mut total_weight = 0.0;
        let weights = self.weights();

        for (seq, weight) in self.sequences.iter().zip(weights.iter()) {
            let weight = *weight;
            let Some(char) = seq[col_index] else {
                continue;
            };

            if is_wildcard(char, self.alphabet) {
                match self.alphabet {
                    Alphabet::Amino => match char {
                        'B' => {
                            counts[amino_index('D')] += weight / 2.0;
                            counts[amino_index('N')] += weight / 2.0;
                        }
                        'Z' => {
                            counts[amino_index('E')] += weight / 2.0;
                            counts[amino_index('Q')] += weight / 2.0;
                        }
                        _ => {
                            let avg = weight / alphabet_size as f64;
                            for c in counts.iter_mut() {
                                *c += avg;
                            }
                        }
                    },
                    Alphabet::Dna | Alphabet::Rna => match char {
                        'R' => {
                            counts[dna_index('G')] += weight / 2.0;
                            counts[dna_index('A')] += weight / 2.0;
                        }
                        'Y' => {
                            counts[dna_index('C')] += weight / 2.0;
                            counts[dna_index('T')] += weight / 2.0;
                        }
                        _ => {
                            // should be 4, but this matches the tool being emulated
                            let avg = weight / 20.0;
                            for c in counts.iter_mut() {
                                *c += avg;
                            }
                        }
                    },
                }
            } else if self.alphabet == Alphabet::Amino {
                counts[amino_index(char)] += weight;
            } else {
                counts[dna_index(char)] += weight;
            }
            total_weight += weight;
        }

        if total_weight > 0.0 {
            for c in counts.iter_mut() {
                *c /= total_weight;
            }
        }
        counts
    }

    /// Total sequence weight of sequences that open a gap at `column`
    /// (column 0: start with a gap; otherwise: gap here but not the column
    /// before).
    pub fn gap_open_weight_total(&self, column: usize) -> f64 {
        let weights = self.weights();
        if column < 1 {
            return self
                .sequences
                .iter()
                .enumerate()
                .filter(|(_, seq)| seq[column].is_none())
                .map(|(i, _)| weights[i])
                .sum();
        }
        self.sequences
            .iter()
            .enumerate()
            .filter(|(_, seq)| seq[column].is_none() && seq[column - 1].is_some())
            .map(|(i, _)| weights[i])
            .sum()
    }

    /// Total sequence weight of sequences that close a gap ending at
    /// `column` (last column: ends with a gap; otherwise: gap here, residue
    /// next).
    pub fn gap_close_weight_total(&self, column: usize) -> f64 {
        let weights = self.weights();
        if self.column_count - 1 == column {
            return self
                .sequences
                .iter()
                .enumerate()
                .filter(|(_, seq)| seq[column].is_none())
                .map(|(i, _)| weights[i])
                .sum();
        }
        self.sequences
            .iter()
            .enumerate()
            .filter(|(_, seq)| seq[column].is_none() && seq[column + 1].is_some())
            .map(|(i, _)| weights[i])
            .sum()
    }

    /// A name -> sequence-string mapping for every sequence in the
    /// alignment.
    pub fn to_dict(&self) -> HashMap<String, String> {
        self.names
            .iter()
            .zip(self.sequences.iter())
            .map(|(n, s)| (n.clone(), s.to_string()))
            .collect()
    }
}

impl PartialEq for Alignment {
    fn eq(&self, other: &Self) -> bool {
        self.sequences == other.sequences && self.names == other.names && self.alphabet == other.alphabet
    }
}

fn amino_index(c: char) -> usize {
    AMINO_ORDER.iter().position(|&r| r == c).expect("canonical amino residue")
}

fn dna_index(c: char) -> usize {
    DNA_ORDER.iter().position(|&r| r == c).expect("canonical dna residue")
}

/// Indices into `values` sorted by descending value, ties broken toward the
/// lower original index (comparator: descending on `(value, -index)`).
fn indices_by_decreasing_value(values: &[f64]) -> Vec<usize> {
    (0..values.len())
        .sorted_by(|&a, &b| values[b].partial_cmp(&values[a]).unwrap().then(a.cmp(&b)))
        .collect()
}

/// Builds a guide tree from an alignment's sequences via UPGMA-like hybrid
/// clustering over pairwise Kimura-corrected distances.
pub fn tree_from_alignment(alignment: &Alignment) -> Tree {
    let leaf_count = alignment.sequences().len();
    let internal_node_count = leaf_count - 1;

    let mut distances = vec![0.0; (leaf_count * internal_node_count) / 2];

    let mut node_indices: Vec<isize> = (0..leaf_count as isize).collect();
    let mut nearest_neighbours = vec![ID_GUARD; leaf_count];
    let mut min_dists = vec![LENGTH_GUARD; leaf_count];

    let mut lefts = vec![ID_GUARD; internal_node_count];
    let mut rights = vec![ID_GUARD; internal_node_count];
    let mut heights = vec![LENGTH_GUARD; internal_node_count];
    let mut left_lengths = vec![LENGTH_GUARD; internal_node_count];
    let mut right_lengths = vec![LENGTH_GUARD; internal_node_count];

    for i in 1..leaf_count {
        let row_start = flat_index(i, 0);
        for j in 0..i {
            let pid = alignment.percentage_identity_pair(i, j);
            distances[row_start + j] = calculate_distance(pid);
        }
        for j in 0..i {
            let distance = distances[row_start + j];
            if distance < min_dists[i] {
                min_dists[i] = distance;
                nearest_neighbours[i] = j as isize;
            }
            if distance < min_dists[j] {
                min_dists[j] = distance;
                nearest_neighbours[j] = i as isize;
            }
        }
    }

    for internal_node_index in 0..internal_node_count {
        let mut left_min = ID_GUARD;
        let mut right_min = ID_GUARD;
        let mut min_dist = LENGTH_GUARD;
        for j in 0..leaf_count {
            if node_indices[j] == ID_GUARD {
                continue;
            }
            let distance = min_dists[j];
            if distance < min_dist {
                min_dist = distance;
                left_min = j as isize;
                right_min = nearest_neighbours[j];
            }
        }

        assert!(left_min != ID_GUARD);
        assert!(right_min != ID_GUARD);
        let (left_min, right_min) = (left_min as usize, right_min as usize);

        let mut new_min_dist = LENGTH_GUARD;
        let mut new_nearest = ID_GUARD;
        for j in 0..leaf_count {
            if j == left_min || j == right_min {
                continue;
            }
            if node_indices[j] == ID_GUARD {
                continue;
            }
            let left_idx = flat_index(left_min, j);
            let distance_left = distances[left_idx];
            let distance_right = distances[flat_index(right_min, j)];
            let new_dist = 0.10 * ((distance_left + distance_right) / 2.0)
                + 0.90 * distance_left.min(distance_right);
            if nearest_neighbours[j] == right_min as isize {
                nearest_neighbours[j] = left_min as isize;
            }
            distances[left_idx] = new_dist;
            if new_dist < new_min_dist {
                new_min_dist = new_dist;
                new_nearest = j as isize;
            }
        }

        let new_height = distances[flat_index(left_min, right_min)] / 2.0;
        let left = node_indices[left_min];
        let right = node_indices[right_min];
        let height_left = if (left as usize) < leaf_count {
            0.0
        } else {
            heights[left as usize - leaf_count]
        };
        let height_right = if (right as usize) < leaf_count {
            0.0
        } else {
            heights[right as usize - leaf_count]
        };

        lefts[internal_node_index] = left;
        rights[internal_node_index] = right;
        left_lengths[internal_node_index] = new_height - height_left;
        right_lengths[internal_node_index] = new_height - height_right;
        heights[internal_node_index] = new_height;

        node_indices[left_min] = (leaf_count + internal_node_index) as isize;
        nearest_neighbours[left_min] = new_nearest;
        min_dists[left_min] = new_min_dist;
        node_indices[right_min] = ID_GUARD;
    }

    let node_count = 2 * leaf_count - 1;
    let root = node_count - 1;

    let mut full_lefts = vec![ID_GUARD; leaf_count];
    full_lefts.extend(lefts);
    let mut full_rights = vec![ID_GUARD; leaf_count];
    full_rights.extend(rights);
    let mut full_left_lengths = vec![LENGTH_GUARD; leaf_count];
    full_left_lengths.extend(left_lengths);
    let mut full_right_lengths = vec![LENGTH_GUARD; leaf_count];
    full_right_lengths.extend(right_lengths);

    let mut parents = vec![ID_GUARD; node_count];
    let mut parent_lengths = vec![LENGTH_GUARD; node_count];
    for i in leaf_count..node_count {
        let left = full_lefts[i];
        let right = full_rights[i];
        parents[left as usize] = i as isize;
        parents[right as usize] = i as isize;
        parent_lengths[left as usize] = full_left_lengths[i];
        parent_lengths[right as usize] = full_right_lengths[i];
    }

    Tree::new(
        node_count,
        parents,
        full_lefts,
        full_rights,
        full_left_lengths,
        full_right_lengths,
        parent_lengths,
        alignment.names().to_vec(),
        root,
    )
}

/// Aligns a query sequence to match a computed path: emits the sequence's
/// next residue (or a gap glyph if it is itself a gap) at Match and
/// Deletion edges, and a gap at Insertion edges.
pub fn build_query_result(sequence: &Sequence, path: &Path) -> String {
    let mut result = String::with_capacity(path.edges.len());
    let mut chars = sequence.0.iter();
    for edge in &path.edges {
        match edge.r#type {
            Modification::Match | Modification::Deletion => {
                result.push(chars.next().unwrap().unwrap_or('-'));
            }
            Modification::Insertion => result.push('-'),
        }
    }
    result
}

/// Aligns a reference sequence to match a computed path: emits the
/// sequence's next residue at Match and Insertion edges, and a gap at
/// Deletion edges.
pub fn build_reference_result(sequence: &Sequence, path: &Path) -> String {
    let mut result = String::with_capacity(path.edges.len());
    let mut chars = sequence.0.iter();
    for edge in &path.edges {
        match edge.r#type {
            Modification::Match | Modification::Insertion => {
                result.push(chars.next().unwrap().unwrap_or('-'));
            }
            Modification::Deletion => result.push('-'),
        }
    }
    result
}

/// The result of merging a query alignment into a reference alignment:
/// the computed path plus both input alignments, from which the newly
/// aligned sequences are derived lazily.
pub struct ResultAlignment<'a> {
    pub path: Path,
    query: &'a Alignment,
    reference: &'a Alignment,
}

impl<'a> ResultAlignment<'a> {
    pub fn column_count(&self) -> usize {
        self.path.edges.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.query.names().iter().chain(self.reference.names().iter())
    }

    pub fn sequences(&self) -> Vec<String> {
        self.query
            .sequences()
            .iter()
            .map(|s| build_query_result(s, &self.path))
            .chain(
                self.reference
                    .sequences()
                    .iter()
                    .map(|s| build_reference_result(s, &self.path)),
            )
            .collect()
    }

    pub fn get_aligned_references(&self) -> HashMap<String, String> {
        self.reference
            .names()
            .iter()
            .cloned()
            .zip(
                self.reference
                    .sequences()
                    .iter()
                    .map(|s| build_reference_result(s, &self.path)),
            )
            .collect()
    }

    pub fn to_dict(&self) -> HashMap<String, String> {
        self.names().cloned().zip(self.sequences()).collect()
    }
}

/// Merges `query` into `reference`, keeping every column of both inputs
/// intact.
pub fn combine_alignments<'a>(
    query: &'a Alignment,
    reference: &'a Alignment,
) -> Result<ResultAlignment<'a>> {
    if query.alphabet() != reference.alphabet() {
        return Err(Error::AlphabetMismatch {
            query: query.alphabet(),
            reference: reference.alphabet(),
        });
    }
    let mut query_positions = query.positions();
    let mut reference_positions = reference.positions();
    let path = global_align(&mut query_positions, &mut reference_positions, reference.alphabet());
    Ok(ResultAlignment {
        path,
        query,
        reference,
    })
}

/// Inserts a bare query sequence into an existing alignment, returning the
/// aligned query and a name -> sequence map for the (possibly newly
/// gapped) reference sequences.
pub fn insert_into_alignment(
    query_sequence: &str,
    alignment: &Alignment,
) -> Result<(String, HashMap<String, String>)> {
    let query = Alignment::new(vec![("query".to_string(), query_sequence.to_string())])?;
    let result = combine_alignments(&query, alignment)?;
    let references_aligned = result.get_aligned_references();
    let query_aligned = build_query_result(&query.sequences()[0], &result.path);
    Ok((query_aligned, references_aligned))
}

/// Inserts a bare query sequence into an existing alignment and returns the
/// aligned query and the aligned form of a single named reference
/// sequence.
pub fn get_aligned_pair(
    query_sequence: &str,
    reference_name: &str,
    alignment: &Alignment,
) -> Result<(String, String)> {
    let ref_seq = alignment
        .get_sequence_by_name(reference_name)
        .ok_or_else(|| Error::UnknownReferenceName(reference_name.to_string()))?
        .clone();
    let query = Alignment::new(vec![("query".to_string(), query_sequence.to_string())])?;
    let result = combine_alignments(&query, alignment)?;
    let query_seq = Sequence::from_string(query_sequence, alignment.alphabet());
    let query_align = build_query_result(&query_seq, &result.path);
    let ref_align = build_reference_result(&ref_seq, &result.path);
    Ok((query_align, ref_align))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn align(pairs: &[(&str, &str)]) -> Alignment {
        Alignment::new(
            pairs
                .iter()
                .map(|(n, s)| (n.to_string(), s.to_string()))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn empty_alignment_is_rejected() {
        assert!(Alignment::new(vec![]).is_err());
    }

    #[test]
    fn inconsistent_lengths_are_rejected() {
        let result = Alignment::new(vec![
            ("a".into(), "ACD".into()),
            ("b".into(), "AC".into()),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn percentage_identity_skips_gap_columns() {
        let a = align(&[("x", "A-C"), ("y", "AGC")]);
        // column 0: A/A match, column 1: gap skipped, column 2: C/C match
        assert_eq!(a.percentage_identity_pair(0, 1), 1.0);
    }

    #[test]
    fn s1_merge_scenario() {
        let query = align(&[("query", "GTIV")]);
        let reference = align(&[("A", "GT-DVG"), ("B", "GTK-VG")]);
        let result = combine_alignments(&query, &reference).unwrap();
        let dict = result.to_dict();
        assert_eq!(dict.get("query").unwrap(), "GT--IV");
        assert_eq!(dict.get("A").unwrap(), "GT-DVG");
        assert_eq!(dict.get("B").unwrap(), "GTK-VG");
    }

    #[test]
    fn s4_gap_open_close_totals() {
        let a = Alignment::with_cache(
            vec![
                ("a".into(), "-ERF".into()),
                ("b".into(), "M-RF".into()),
                ("c".into(), "-E--".into()),
            ],
            Some(vec![0.7, 0.2, 0.1]),
            None,
        )
        .unwrap();
        let opens: Vec<f64> = (0..4).map(|c| a.gap_open_weight_total(c)).collect();
        let closes: Vec<f64> = (0..4).map(|c| a.gap_close_weight_total(c)).collect();
        for (got, want) in opens.iter().zip([0.8, 0.2, 0.1, 0.0]) {
            assert!((got - want).abs() < 1e-9);
        }
        for (got, want) in closes.iter().zip([0.8, 0.2, 0.0, 0.1]) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn s5_amino_wildcard_split() {
        let a = Alignment::with_cache(
            vec![("A".into(), "BA-".into()), ("B".into(), "AZX".into())],
            Some(vec![0.2, 0.8]),
            None,
        )
        .unwrap();
        let c0 = a.fractional_weighted_counts(0);
        assert!((c0[amino_index('A')] - 0.8).abs() < 1e-9);
        assert!((c0[amino_index('D')] - 0.1).abs() < 1e-9);
        assert!((c0[amino_index('N')] - 0.1).abs() < 1e-9);

        let c1 = a.fractional_weighted_counts(1);
        assert!((c1[amino_index('A')] - 0.2).abs() < 1e-9);
        assert!((c1[amino_index('E')] - 0.4).abs() < 1e-9);
        assert!((c1[amino_index('Q')] - 0.4).abs() < 1e-9);

        let c2 = a.fractional_weighted_counts(2);
        for v in c2 {
            assert!((v - 0.05).abs() < 1e-9);
        }
    }

    #[test]
    fn s6_dna_wildcard_split_uses_divisor_twenty() {
        let a = Alignment::with_cache(
            vec![("A".into(), "RA-".into()), ("B".into(), "AYN".into())],
            Some(vec![0.2, 0.8]),
            None,
        )
        .unwrap()
        .with_alphabet(Alphabet::Dna);
        let c0 = a.fractional_weighted_counts(0);
        assert!((c0[dna_index('G')] - 0.1).abs() < 1e-9);
        assert!((c0[dna_index('A')] - 0.9).abs() < 1e-9);

        let c2 = a.fractional_weighted_counts(2);
        for v in c2 {
            assert!((v - 0.05).abs() < 1e-9);
        }
    }
}
