//! FASTA parsing and emission. Deliberately hand-rolled rather than pulled
//! in from a crate: the reject conditions below need to surface as
//! distinguishable error kinds, which a generic FASTA parser does not give.

use std::io::{BufRead, Write};

use crate::error::{Error, Result};

/// Parses a FASTA document into name-ordered `(name, sequence)` pairs.
///
/// Rejects a header with no following sequence line, a sequence line with
/// no preceding header, and (via the caller, since length-checking is an
/// `Alignment` invariant) inconsistent lengths.
pub fn parse<R: BufRead>(reader: R) -> Result<Vec<(String, String)>> {
    let mut records: Vec<(String, String)> = Vec::new();
    let mut current_name: Option<String> = None;
    let mut current_seq = String::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }
        if let Some(name) = line.strip_prefix('>') {
            if let Some(prev_name) = current_name.take() {
                if current_seq.is_empty() {
                    return Err(Error::MissingSequence { name: prev_name });
                }
                records.push((prev_name, std::mem::take(&mut current_seq)));
            }
            current_name = Some(name.trim().to_string());
        } else {
            if current_name.is_none() {
                return Err(Error::SequenceWithoutName);
            }
            current_seq.push_str(line);
        }
    }

    match current_name {
        Some(name) => {
            if current_seq.is_empty() {
                return Err(Error::MissingSequence { name });
            }
            records.push((name, current_seq));
        }
        None if records.is_empty() => return Err(Error::SequenceWithoutName),
        None => {}
    }

    Ok(records)
}

/// Writes a FASTA document, wrapping each sequence to `columns` characters
/// per line (`columns <= 0` disables wrapping). Uses the host platform's
/// line separator.
pub fn write<W: Write>(
    mut writer: W,
    records: impl IntoIterator<Item = (impl AsRef<str>, impl AsRef<str>)>,
    columns: i64,
) -> Result<()> {
    let line_sep = line_separator();
    for (name, sequence) in records {
        write!(writer, ">{}{line_sep}", name.as_ref())?;
        let sequence = sequence.as_ref();
        if columns <= 0 {
            write!(writer, "{sequence}{line_sep}")?;
        } else {
            let columns = columns as usize;
            let chars: Vec<char> = sequence.chars().collect();
            for chunk in chars.chunks(columns) {
                let line: String = chunk.iter().collect();
                write!(writer, "{line}{line_sep}")?;
            }
        }
    }
    Ok(())
}

#[cfg(target_family = "windows")]
fn line_separator() -> &'static str {
    "\r\n"
}

#[cfg(not(target_family = "windows"))]
fn line_separator() -> &'static str {
    "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_fasta() {
        let input = b">a\nACGT\n>b\nAC\nGT\n" as &[u8];
        let records = parse(input).unwrap();
        assert_eq!(records, vec![
            ("a".to_string(), "ACGT".to_string()),
            ("b".to_string(), "ACGT".to_string()),
        ]);
    }

    #[test]
    fn rejects_sequence_without_header() {
        let input = b"ACGT\n" as &[u8];
        assert!(matches!(parse(input), Err(Error::SequenceWithoutName)));
    }

    #[test]
    fn rejects_header_without_sequence() {
        let input = b">a\n>b\nACGT\n" as &[u8];
        assert!(matches!(parse(input), Err(Error::MissingSequence { .. })));
    }

    #[test]
    fn wraps_output_at_requested_width() {
        let mut out = Vec::new();
        write(&mut out, vec![("a", "ACGTACGT")], 3).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ACG"));
        assert!(text.starts_with(">a"));
    }

    #[test]
    fn zero_columns_disables_wrapping() {
        let mut out = Vec::new();
        write(&mut out, vec![("a", "ACGTACGT")], 0).unwrap();
        let text = String::from_utf8(out).unwrap();
        let body = text.lines().nth(1).unwrap();
        assert_eq!(body, "ACGTACGT");
    }
}
