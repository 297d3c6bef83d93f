#![doc = include_str!("../README.md")]
#![allow(dead_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::must_use_candidate,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::wildcard_imports,
    clippy::module_name_repetitions,
    clippy::suboptimal_flops,
    clippy::too_many_lines,
    clippy::similar_names
)]

pub mod align;
pub mod alignment;
pub mod alphabet;
pub mod cache;
pub mod cli;
pub mod constants;
pub mod distance;
pub mod error;
pub mod fasta;
pub mod path;
pub mod position;
pub mod sequence;
pub mod tree;
