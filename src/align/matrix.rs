//! The affine-gap DP recurrence and its bit-packed traceback matrix.

use crate::alphabet::Alphabet;
use crate::constants::{GAP_EXTEND, SCORE_GUARD};
use crate::path::{Edge, Modification, Path};
use crate::position::{compare_profile_positions, set_terminal_gaps, AlignmentPosition};

// M-predecessor field (mask 0x03): which state a Match cell was reached from.
const BIT_MM: u8 = 0x00;
const BIT_DM: u8 = 0x01;
const BIT_IM: u8 = 0x02;
const MASK_M: u8 = 0x03;

// D-predecessor field (mask 0x04): whether a Delete cell extended (DD) or opened (MD).
const BIT_DD: u8 = 0x00;
const BIT_MD: u8 = 0x04;
const MASK_D: u8 = 0x04;

// I-predecessor field (mask 0x08): whether an Insert cell extended (II) or opened (MI).
const BIT_II: u8 = 0x00;
const BIT_MI: u8 = 0x08;
const MASK_I: u8 = 0x08;

/// Resolves a Python-style possibly-negative list index against a length.
fn py_index(len: usize, idx: isize) -> usize {
    if idx >= 0 {
        idx as usize
    } else {
        (len as isize + idx) as usize
    }
}

/// Builds and returns the path for two profiles being merged into one
/// combined alignment.
pub fn global_align(
    query_positions: &mut [AlignmentPosition],
    reference_positions: &mut [AlignmentPosition],
    alphabet: Alphabet,
) -> Path {
    set_terminal_gaps(query_positions);
    set_terminal_gaps(reference_positions);

    let query_length = query_positions.len();
    let reference_length = reference_positions.len();
    let pref1 = query_length + 1;
    let pref2 = reference_length + 1;

    let mut current_match = vec![0.0; pref2];
    let mut next_match = vec![0.0; pref2];
    let mut prev_match = vec![SCORE_GUARD; pref2];
    let mut delete_row = vec![SCORE_GUARD; pref2];
    let mut traceback = vec![vec![0u8; pref2]; pref1];

    let set_bit_tbm = |traceback: &mut [Vec<u8>], i: usize, j: usize, modification: Modification| {
        let bit = match modification {
            Modification::Match => BIT_MM,
            Modification::Deletion => BIT_DM,
            Modification::Insertion => BIT_IM,
        };
        traceback[i][j] = (traceback[i][j] & !MASK_M) | bit;
    };

    // start/init
    prev_match[0] = 0.0;
    current_match[0] = SCORE_GUARD;
    current_match[1] = compare_profile_positions(&query_positions[0], &reference_positions[0], alphabet);
    set_bit_tbm(&mut traceback, 1, 1, Modification::Match);

    for j in 2..pref2 {
        current_match[j] = compare_profile_positions(&query_positions[0], &reference_positions[j - 1], alphabet)
            + reference_positions[0].score_gap_open
            + (j as f64 - 2.0) * GAP_EXTEND
            + reference_positions[j - 2].score_gap_close;
        set_bit_tbm(&mut traceback, 1, j, Modification::Insertion);
    }

    // mid
    for i in 1..query_length {
        let mut iij = SCORE_GUARD;
        delete_row[0] = query_positions[0].score_gap_open + (i as f64 - 1.0) * GAP_EXTEND;
        current_match[0] = SCORE_GUARD;

        if i == 1 {
            current_match[1] = compare_profile_positions(&query_positions[0], &reference_positions[0], alphabet);
            set_bit_tbm(&mut traceback, i, 1, Modification::Match);
        } else {
            current_match[1] = compare_profile_positions(&query_positions[i - 1], &reference_positions[0], alphabet)
                + query_positions[0].score_gap_open
                + (i as f64 - 2.0) * GAP_EXTEND
                + query_positions[i - 2].score_gap_close;
            set_bit_tbm(&mut traceback, i, 1, Modification::Deletion);
        }

        for j in 1..reference_length {
            next_match[j + 1] = compare_profile_positions(&query_positions[i], &reference_positions[j], alphabet);
        }

        for j in 1..reference_length {
            recurse_d(
                &mut traceback[i],
                &mut delete_row,
                &prev_match,
                query_positions,
                i,
                j,
            );
            iij = recurse_i(
                iij,
                &mut traceback[i],
                &current_match,
                reference_positions,
                j,
            );
            recurse_m(
                iij,
                &mut traceback,
                &mut next_match,
                &current_match,
                &delete_row,
                query_positions,
                reference_positions,
                i,
                j,
            );
        }

        recurse_d(
            &mut traceback[i],
            &mut delete_row,
            &prev_match,
            query_positions,
            i,
            reference_length,
        );
        iij = recurse_i(
            iij,
            &mut traceback[i],
            &current_match,
            reference_positions,
            reference_length,
        );

        std::mem::swap(&mut prev_match, &mut current_match);
        std::mem::swap(&mut current_match, &mut next_match);
    }

    // final
    current_match[0] = SCORE_GUARD;
    let comparison = compare_profile_positions(
        &query_positions[query_length - 1],
        &reference_positions[0],
        alphabet,
    );
    current_match[1] = comparison + query_positions[0].score_gap_open;
    current_match[1] += (query_length as f64 - 2.0) * GAP_EXTEND
        + query_positions[py_index(query_length, query_length as isize - 2)].score_gap_close;
    set_bit_tbm(&mut traceback, query_length, 1, Modification::Deletion);

    delete_row[0] = SCORE_GUARD;
    for j in 1..pref2 {
        recurse_d(
            &mut traceback[query_length],
            &mut delete_row,
            &prev_match,
            query_positions,
            query_length,
            j,
        );
    }

    let mut iij = SCORE_GUARD;
    for j in 1..pref2 {
        iij = recurse_i(
            iij,
            &mut traceback[query_length],
            &current_match,
            reference_positions,
            j,
        );
    }

    let dab = delete_row[reference_length];
    let iab = iij;

    let mut score = current_match[reference_length];
    let mut edge_type = Modification::Match;

    if dab > score {
        score = dab;
        edge_type = Modification::Deletion;
    }
    if iab > score {
        score = iab;
        edge_type = Modification::Insertion;
    }
    let _ = score;

    build_path(&traceback, query_length, reference_length, edge_type)
}

#[allow(clippy::too_many_arguments)]
fn recurse_d(
    row: &mut [u8],
    delete_row: &mut [f64],
    prev_match: &[f64],
    query_positions: &[AlignmentPosition],
    i: usize,
    j: usize,
) {
    let dd = delete_row[j] + GAP_EXTEND;
    let md = prev_match[j] + query_positions[i - 1].score_gap_open;
    if dd > md {
        delete_row[j] = dd;
    } else {
        delete_row[j] = md;
        row[j] = (row[j] & !MASK_D) | BIT_MD;
    }
}

fn recurse_i(
    mut iij: f64,
    row: &mut [u8],
    current_match: &[f64],
    reference_positions: &[AlignmentPosition],
    j: usize,
) -> f64 {
    iij += GAP_EXTEND;
    let mi = current_match[j - 1] + reference_positions[j - 1].score_gap_open;
    if mi >= iij {
        iij = mi;
        row[j] = (row[j] & !MASK_I) | BIT_MI;
    }
    iij
}

#[allow(clippy::too_many_arguments)]
fn recurse_m(
    iij: f64,
    traceback: &mut [Vec<u8>],
    next_match: &mut [f64],
    current_match: &[f64],
    delete_row: &[f64],
    query_positions: &[AlignmentPosition],
    reference_positions: &[AlignmentPosition],
    i: usize,
    j: usize,
) {
    let dm = delete_row[j] + query_positions[i - 1].score_gap_close;
    let im = iij + reference_positions[j - 1].score_gap_close;
    let mm = current_match[j];
    let bit = if mm >= dm && mm >= im {
        next_match[j + 1] += mm;
        BIT_MM
    } else if dm >= mm && dm >= im {
        next_match[j + 1] += dm;
        BIT_DM
    } else {
        next_match[j + 1] += im;
        BIT_IM
    };
    traceback[i + 1][j + 1] = (traceback[i + 1][j + 1] & !MASK_M) | bit;
}

/// Decodes the predecessor state of a traceback cell given the modification
/// that is currently being stepped back from.
fn get_modification(bits: u8, previous: Modification) -> Modification {
    match previous {
        Modification::Match => match bits & MASK_M {
            BIT_MM => Modification::Match,
            BIT_DM => Modification::Deletion,
            BIT_IM => Modification::Insertion,
            v => unreachable!("incompatible matrix value for match: {v}"),
        },
        Modification::Deletion => match bits & MASK_D {
            BIT_MD => Modification::Match,
            BIT_DD => Modification::Deletion,
            v => unreachable!("incompatible matrix value for deletion: {v}"),
        },
        Modification::Insertion => match bits & MASK_I {
            BIT_MI => Modification::Match,
            BIT_II => Modification::Insertion,
            v => unreachable!("incompatible matrix value for insertion: {v}"),
        },
    }
}

/// Walks the traceback matrix from `(query_length, reference_length)` back
/// to the origin, emitting edges in reverse then returning them in
/// forward order.
fn build_path(
    traceback: &[Vec<u8>],
    query_length: usize,
    reference_length: usize,
    last_edge: Modification,
) -> Path {
    let mut edge = Edge::new(last_edge, query_length, reference_length);
    let mut edges = vec![edge];

    loop {
        let pla = edge.query_length;
        let plb = edge.reference_length;
        let bits = traceback[pla][plb];
        let next_edge_type = get_modification(bits, edge.r#type);

        match edge.r#type {
            Modification::Match => {
                edge.query_length -= 1;
                edge.reference_length -= 1;
            }
            Modification::Deletion => edge.query_length -= 1,
            Modification::Insertion => edge.reference_length -= 1,
        }

        if edge.query_length == 0 && edge.reference_length == 0 {
            break;
        }

        edge.r#type = next_edge_type;
        edges.push(edge);
    }

    edges.reverse();
    Path::new(edges)
}
