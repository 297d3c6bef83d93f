//! End-to-end tests exercising the public merge API: constructing
//! alignments from raw sequence data, merging them, round-tripping through
//! a cache, and checking the invariants profile construction must uphold.

use profalign::alignment::{combine_alignments, Alignment};
use profalign::alphabet::Alphabet;
use profalign::distance::calculate_distance;

fn alignment(pairs: &[(&str, &str)]) -> Alignment {
    Alignment::new(
        pairs
            .iter()
            .map(|(n, s)| (n.to_string(), s.to_string()))
            .collect(),
    )
    .unwrap()
}

#[test]
fn s1_merges_a_query_into_a_two_sequence_reference() {
    let query = alignment(&[("query", "GTIV")]);
    let reference = alignment(&[("A", "GT-DVG"), ("B", "GTK-VG")]);
    let result = combine_alignments(&query, &reference).unwrap();
    let dict = result.to_dict();
    assert_eq!(dict["query"], "GT--IV");
    assert_eq!(dict["A"], "GT-DVG");
    assert_eq!(dict["B"], "GTK-VG");
}

#[test]
fn s2_alphabet_from_string_accepts_case_and_synonyms() {
    assert_eq!(Alphabet::from_string("PROT").unwrap(), Alphabet::Amino);
    assert_eq!(Alphabet::from_string("dna").unwrap(), Alphabet::Dna);
}

#[test]
fn s3_distance_boundary_cases() {
    assert_eq!(calculate_distance(1.0), 0.0);
    assert_eq!(calculate_distance(0.0), 10.0);
    let d = 1.0 - 0.5_f64;
    let expected = -(1.0 - d - d * d / 5.0).ln();
    assert!((calculate_distance(0.5) - expected).abs() < 1e-9);
}

#[test]
fn property_base_counts_sum_to_zero_or_one() {
    let a = alignment(&[("a", "ACD-"), ("b", "-CDE"), ("c", "ACDE")]);
    for position in a.positions() {
        let sum: f64 = position.base_counts.iter().sum();
        assert!(sum < 1e-5 || (sum - 1.0).abs() < 1e-5, "sum was {sum}");
    }
}

#[test]
fn property_sort_order_is_a_descending_permutation() {
    let a = alignment(&[("a", "ACDEFGHIKLMNPQRSTVWY"), ("b", "ACDEFGHIKLMNPQRSTVWY")]);
    for position in a.positions() {
        let mut seen = position.sort_order.clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
        for pair in position.sort_order.windows(2) {
            assert!(position.base_counts[pair[0]] >= position.base_counts[pair[1]]);
        }
    }
}

#[test]
fn property_weights_are_normalised() {
    let a = alignment(&[
        ("a", "ACDE"),
        ("b", "ACDD"),
        ("c", "ACEE"),
        ("d", "ACDE"),
    ]);
    let weights = a.weights();
    assert!(weights.iter().all(|&w| w >= 0.0));
    let sum: f64 = weights.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6);
}

#[test]
fn property_path_edge_counts_match_profile_lengths() {
    use profalign::path::Modification;

    let query = alignment(&[("query", "ACDEFGH")]);
    let reference = alignment(&[("ref1", "AC-EFGH"), ("ref2", "ACDE-GH")]);
    let result = combine_alignments(&query, &reference).unwrap();

    let md = result
        .path
        .edges
        .iter()
        .filter(|e| matches!(e.r#type, Modification::Match | Modification::Deletion))
        .count();
    let mi = result
        .path
        .edges
        .iter()
        .filter(|e| matches!(e.r#type, Modification::Match | Modification::Insertion))
        .count();
    assert_eq!(md, query.column_count());
    assert_eq!(mi, reference.column_count());
}

#[test]
fn property_identical_single_sequences_align_with_only_matches() {
    use profalign::path::Modification;

    let query = alignment(&[("query", "ACDEFGH")]);
    let reference = alignment(&[("reference", "ACDEFGH")]);
    let result = combine_alignments(&query, &reference).unwrap();
    assert!(result
        .path
        .edges
        .iter()
        .all(|e| e.r#type == Modification::Match));
}

#[test]
fn cache_round_trip_reproduces_weights_and_positions() {
    let a = alignment(&[("a", "ACD-"), ("b", "-CDE"), ("c", "ACDE")]);
    let weights = a.weights();
    let positions = a.positions();
    let sequence_by_name: Vec<(String, String)> = a
        .names()
        .iter()
        .zip(a.sequences().iter())
        .map(|(n, s)| (n.clone(), s.to_string()))
        .collect();

    let mut buf = Vec::new();
    profalign::cache::save(&mut buf, a.alphabet(), &sequence_by_name, &weights, &positions).unwrap();

    let loaded = profalign::cache::load(buf.as_slice()).unwrap();
    assert_eq!(loaded.weights, weights);
    assert_eq!(loaded.positions, positions);
    assert_eq!(loaded.sequence_by_name.len(), sequence_by_name.len());
}
