//! Command-line entry point: merges a query alignment into a reference
//! alignment and writes the combined FASTA to stdout, or builds a cache
//! file for later reuse.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, warn};

use profalign::alignment::{combine_alignments, Alignment};
use profalign::cli::{rewrite_muscle_args, Cli};
use profalign::{cache, fasta};

fn main() -> ExitCode {
    env_logger::init();

    let raw_args: Vec<String> = std::env::args().collect();
    let args = rewrite_muscle_args(raw_args);
    let cli = Cli::parse_from(args);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    if let Some(cache_path) = &cli.build_cache {
        return build_cache(&cli.query, cache_path).map_err(|err| format!("Could not build cache file: {err}"));
    }

    let reference_path = cli
        .reference_alignment
        .as_ref()
        .ok_or_else(|| "a reference alignment is required unless --build-cache is given".to_string())?;

    let reference = load_reference(reference_path)
        .map_err(|err| format!("Unknown reference alignment format: {err}"))?;
    let query = load_fasta_alignment(&cli.query)
        .map_err(|err| format!("Invalid query format: {err}"))?;

    let result = combine_alignments(&query, &reference).map_err(|err| err.to_string())?;
    let names: Vec<String> = result.names().cloned().collect();
    let sequences = result.sequences();

    let stdout = std::io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    if let Err(err) = fasta::write(&mut writer, names.into_iter().zip(sequences), cli.output_columns) {
        if is_broken_pipe(&err) {
            return Ok(());
        }
        return Err(err.to_string());
    }
    if let Err(err) = writer.flush() {
        if !is_broken_pipe(&err) {
            return Err(err.to_string());
        }
    }
    Ok(())
}

fn is_broken_pipe(err: &profalign::error::Error) -> bool {
    matches!(err, profalign::error::Error::NotReadable(io_err) if io_err.kind() == std::io::ErrorKind::BrokenPipe)
}

fn load_reference(path: &std::path::Path) -> profalign::error::Result<Alignment> {
    match cache::load(BufReader::new(File::open(path)?)) {
        Ok(loaded) => {
            debug!("loaded reference alignment from cache {path:?}");
            Alignment::with_cache_and_alphabet(
                loaded.sequence_by_name,
                loaded.alphabet,
                Some(loaded.weights),
                Some(loaded.positions),
            )
        }
        Err(profalign::error::Error::InvalidCacheFormat(_)) => {
            warn!("{path:?} is not a cache file, falling back to FASTA parsing");
            load_fasta_alignment(path)
        }
        Err(err) => Err(err),
    }
}

fn load_fasta_alignment(path: &std::path::Path) -> profalign::error::Result<Alignment> {
    let records = fasta::parse(BufReader::new(File::open(path)?))?;
    Alignment::new(records)
}

fn build_cache(query_path: &std::path::Path, cache_path: &std::path::Path) -> profalign::error::Result<()> {
    let alignment = load_fasta_alignment(query_path)?;
    let weights = alignment.weights();
    let positions = alignment.positions();
    let sequence_by_name: Vec<(String, String)> = alignment
        .names()
        .iter()
        .zip(alignment.sequences().iter())
        .map(|(n, s)| (n.clone(), s.to_string()))
        .collect();
    cache::save(
        BufWriter::new(File::create(cache_path)?),
        alignment.alphabet(),
        &sequence_by_name,
        &weights,
        &positions,
    )
}
