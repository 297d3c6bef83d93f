//! The command-line argument surface, including rewriting the legacy
//! MUSCLE-style flags this tool's profile-profile mode is a drop-in for.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Merge a query alignment into a reference alignment.")]
pub struct Cli {
    /// Query alignment, as a FASTA file.
    #[arg(value_name = "FASTA")]
    pub query: PathBuf,

    /// Reference alignment, as a FASTA file or a cache file produced by
    /// `--build-cache`.
    #[arg(long, value_name = "DB_FASTA")]
    pub reference_alignment: Option<PathBuf>,

    /// If given, write a cache of the query alignment to this path instead
    /// of merging.
    #[arg(long, value_name = "CACHE_PATH")]
    pub build_cache: Option<PathBuf>,

    /// Output line wrap width; 0 or negative disables wrapping.
    #[arg(long, default_value_t = 60)]
    pub output_columns: i64,
}

/// Rewrites legacy MUSCLE-style profile-profile arguments into this tool's
/// native flags, so existing pipelines built around `-profile -in1 A -in2 B`
/// keep working unchanged.
///
/// Only triggers when at least one of `-profile`, `-in1`, `-in2` is present;
/// `-quiet` is accepted and discarded since there is no non-quiet mode to
/// toggle against.
pub fn rewrite_muscle_args(args: Vec<String>) -> Vec<String> {
    let mut args = args;
    let has_muscle_flag = args
        .iter()
        .any(|a| a == "-profile" || a == "-in1" || a == "-in2");
    if !has_muscle_flag {
        return args;
    }

    if let Some(pos) = args.iter().position(|a| a == "-quiet") {
        args.remove(pos);
    }
    if let Some(pos) = args.iter().position(|a| a == "-profile") {
        args.remove(pos);
    }
    if let Some(pos) = args.iter().position(|a| a == "-in1") {
        args.remove(pos);
    }
    if let Some(pos) = args.iter().position(|a| a == "-in2") {
        args[pos] = "--reference-alignment".to_string();
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_native_args_untouched() {
        let args = vec!["profalign".to_string(), "query.fa".to_string()];
        assert_eq!(rewrite_muscle_args(args.clone()), args);
    }

    #[test]
    fn rewrites_muscle_style_invocation() {
        let args = vec![
            "profalign".to_string(),
            "-profile".to_string(),
            "-quiet".to_string(),
            "-in1".to_string(),
            "query.fa".to_string(),
            "-in2".to_string(),
            "reference.fa".to_string(),
        ];
        let rewritten = rewrite_muscle_args(args);
        assert_eq!(
            rewritten,
            vec![
                "profalign".to_string(),
                "query.fa".to_string(),
                "--reference-alignment".to_string(),
                "reference.fa".to_string(),
            ]
        );
    }

    #[test]
    fn in2_without_in1_is_still_rewritten() {
        // -profile or -in1 alone is enough to trigger the rewrite path.
        let args = vec![
            "profalign".to_string(),
            "-in1".to_string(),
            "query.fa".to_string(),
        ];
        assert_eq!(
            rewrite_muscle_args(args),
            vec!["profalign".to_string(), "query.fa".to_string()]
        );
    }
}
