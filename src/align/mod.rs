//! Global profile-profile alignment: an affine-gap Needleman-Wunsch variant
//! operating on profile columns, with a bit-packed three-state (M/D/I)
//! traceback matrix.

mod matrix;

pub use matrix::global_align;
