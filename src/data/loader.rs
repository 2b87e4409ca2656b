use std::path::Path;
use std::str::FromStr;

use super::error::DataError;
use super::model::{Columns, Dataset, Observation, Reference};

/// First token of a comment row.
pub const COMMENT_TAG: &str = "#";
/// First token of the infinite-size reference row.
pub const REFERENCE_TAG: &str = "inf";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read a results file and parse it into a [`Dataset`].
pub fn load_file(path: &Path, columns: Columns) -> Result<Dataset, DataError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_str(&text, columns)?;
    log::info!(
        "Loaded {} finite-size rows from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse the text of a results file.
///
/// The text is scanned twice: once for the `inf` row, then for the data rows.
/// The reference is therefore known before any data row is interpreted, wherever
/// the `inf` row sits in the file.
pub fn parse_str(text: &str, columns: Columns) -> Result<Dataset, DataError> {
    let reference = scan_reference(text, columns)?.ok_or(DataError::MissingReference)?;
    let observations = scan_observations(text, columns)?;
    Ok(Dataset {
        reference,
        observations,
    })
}

// ---------------------------------------------------------------------------
// Row classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Blank,
    Comment,
    Reference,
    Data,
}

/// A row is a comment when its first token *starts with* `#`, so headers written
/// as `#L T ...` are skipped too. This is broader than an exact `#` tag match.
fn classify(fields: &[&str]) -> RowKind {
    match fields.first() {
        None => RowKind::Blank,
        Some(&tag) if tag.starts_with(COMMENT_TAG) => RowKind::Comment,
        Some(&REFERENCE_TAG) => RowKind::Reference,
        Some(_) => RowKind::Data,
    }
}

/// Split every line on whitespace, numbering lines from 1.
fn rows<'a>(text: &'a str) -> impl Iterator<Item = (usize, &'a str, Vec<&'a str>)> + 'a {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line, line.split_whitespace().collect()))
}

// ---------------------------------------------------------------------------
// Scans
// ---------------------------------------------------------------------------

/// Every `inf` row is parsed; the last one wins.
fn scan_reference(text: &str, columns: Columns) -> Result<Option<Reference>, DataError> {
    let mut reference = None;
    for (line_no, line, fields) in rows(text) {
        if classify(&fields) != RowKind::Reference {
            continue;
        }
        check_width(&fields, columns, line_no, line)?;
        if reference.is_some() {
            log::warn!("line {line_no}: another `inf` row, replacing the earlier reference");
        }
        reference = Some(Reference {
            free_energy: field(&fields, columns.free_energy, line_no, line)?,
            energy: field(&fields, columns.energy, line_no, line)?,
        });
    }
    Ok(reference)
}

fn scan_observations(text: &str, columns: Columns) -> Result<Vec<Observation>, DataError> {
    let mut observations = Vec::new();
    let mut skipped = 0usize;
    for (line_no, line, fields) in rows(text) {
        if classify(&fields) != RowKind::Data {
            skipped += 1;
            continue;
        }
        check_width(&fields, columns, line_no, line)?;
        let size: u64 = field(&fields, 0, line_no, line)?;
        if size == 0 {
            return Err(DataError::malformed(
                line_no,
                line,
                "lattice size must be positive",
            ));
        }
        observations.push(Observation {
            size,
            free_energy: field(&fields, columns.free_energy, line_no, line)?,
            energy: field(&fields, columns.energy, line_no, line)?,
        });
    }
    log::debug!(
        "{} data rows, {skipped} comment/reference/blank rows skipped",
        observations.len()
    );
    Ok(observations)
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn check_width(
    fields: &[&str],
    columns: Columns,
    line_no: usize,
    line: &str,
) -> Result<(), DataError> {
    let needed = columns.min_fields();
    if fields.len() < needed {
        return Err(DataError::malformed(
            line_no,
            line,
            format!("expected at least {needed} fields, found {}", fields.len()),
        ));
    }
    Ok(())
}

fn field<T: FromStr>(
    fields: &[&str],
    idx: usize,
    line_no: usize,
    line: &str,
) -> Result<T, DataError> {
    let tok = fields[idx];
    tok.parse::<T>().map_err(|_| {
        DataError::malformed(
            line_no,
            line,
            format!(
                "field {idx} ('{tok}') is not a valid {}",
                std::any::type_name::<T>()
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const EXAMPLE: &str = "\
# header
inf 0 0 0 0 0 10.0 20.0
4 0 0 0 0 0 10.5 21.0
8 0 0 0 0 0 10.2 20.4
";

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12)
    }

    #[test]
    fn example_file_yields_expected_series() {
        let ds = parse_str(EXAMPLE, Columns::default()).unwrap();
        assert_eq!(
            ds.reference,
            Reference {
                free_energy: 10.0,
                energy: 20.0
            }
        );
        let errors = ds.finite_size_errors();
        assert_eq!(errors.sizes, vec![4, 8]);
        assert!(close(&errors.free_energy, &[0.5, 0.2]));
        assert!(close(&errors.energy, &[1.0, 0.4]));
    }

    #[test]
    fn reference_after_data_rows_is_still_used() {
        let text = "\
16 a b c d e 1.25 -2.0
inf a b c d e 1.0 -1.5
32 a b c d e 0.75 -1.0
";
        let errors = parse_str(text, Columns::default())
            .unwrap()
            .finite_size_errors();
        assert_eq!(errors.sizes, vec![16, 32]);
        assert!(close(&errors.free_energy, &[0.25, 0.25]));
        assert!(close(&errors.energy, &[0.5, 0.5]));
    }

    #[test]
    fn comment_rows_never_reach_the_output() {
        let text = "\
# L T m m2 m4 x f e
#   99 0 0 0 0 0 0 0
inf 0 0 0 0 0 1.0 2.0
# 123 not a data row
2 0 0 0 0 0 1.5 2.5
";
        let ds = parse_str(text, Columns::default()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.observations[0].size, 2);
    }

    #[test]
    fn hash_prefixed_first_token_is_also_a_comment() {
        let text = "\
#L T m m2 m4 x f e
#inf 0 0 0 0 0 9.0 9.0
inf 0 0 0 0 0 1.0 2.0
4 0 0 0 0 0 1.5 2.5
";
        let ds = parse_str(text, Columns::default()).unwrap();
        assert_eq!(ds.reference.free_energy, 1.0);
        assert_eq!(ds.len(), 1);
        assert_eq!(classify(&["#L", "T"]), RowKind::Comment);
        assert_eq!(classify(&["#"]), RowKind::Comment);
        assert_eq!(classify(&["L#"]), RowKind::Data);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let text = "\ninf 0 0 0 0 0 1 1\n\n   \n3 0 0 0 0 0 2 3\n";
        let ds = parse_str(text, Columns::default()).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn last_reference_row_wins() {
        let text = "\
inf 0 0 0 0 0 1.0 1.0
inf 0 0 0 0 0 2.0 3.0
4 0 0 0 0 0 2.5 3.5
";
        let ds = parse_str(text, Columns::default()).unwrap();
        assert_eq!(ds.reference.free_energy, 2.0);
        assert_eq!(ds.reference.energy, 3.0);
    }

    #[test]
    fn missing_reference_is_an_error() {
        let text = "# only data\n4 0 0 0 0 0 1 2\n";
        let err = parse_str(text, Columns::default()).unwrap_err();
        assert!(matches!(err, DataError::MissingReference));
    }

    #[test]
    fn missing_reference_is_reported_before_bad_data_rows() {
        let text = "4 0 0\n";
        let err = parse_str(text, Columns::default()).unwrap_err();
        assert!(matches!(err, DataError::MissingReference));
    }

    #[test]
    fn short_row_names_the_offending_line() {
        let text = "inf 0 0 0 0 0 1 2\n# ok\n4 0 0 0 0\n";
        let err = parse_str(text, Columns::default()).unwrap_err();
        match &err {
            DataError::MalformedRow { line, content, .. } => {
                assert_eq!(*line, 3);
                assert_eq!(content, "4 0 0 0 0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("line 3:"));
    }

    #[test]
    fn short_reference_row_is_malformed() {
        let err = parse_str("inf 1 2 3\n", Columns::default()).unwrap_err();
        assert!(matches!(err, DataError::MalformedRow { line: 1, .. }));
    }

    #[test]
    fn unparseable_fields_are_malformed() {
        let bad_size = "inf 0 0 0 0 0 1 2\n4.5 0 0 0 0 0 1 2\n";
        assert!(matches!(
            parse_str(bad_size, Columns::default()),
            Err(DataError::MalformedRow { line: 2, .. })
        ));

        let bad_value = "inf 0 0 0 0 0 1 2\n4 0 0 0 0 0 x 2\n";
        assert!(matches!(
            parse_str(bad_value, Columns::default()),
            Err(DataError::MalformedRow { line: 2, .. })
        ));

        let bad_reference = "inf 0 0 0 0 0 nope 2\n";
        assert!(matches!(
            parse_str(bad_reference, Columns::default()),
            Err(DataError::MalformedRow { line: 1, .. })
        ));
    }

    #[test]
    fn zero_size_is_rejected() {
        let text = "inf 0 0 0 0 0 1 2\n0 0 0 0 0 0 1 2\n";
        assert!(matches!(
            parse_str(text, Columns::default()),
            Err(DataError::MalformedRow { line: 2, .. })
        ));
    }

    #[test]
    fn custom_columns_change_the_required_width() {
        let cols = Columns {
            free_energy: 1,
            energy: 2,
        };
        let text = "inf 1.0 2.0\n10 1.1 2.2\n";
        let errors = parse_str(text, cols).unwrap().finite_size_errors();
        assert_eq!(errors.sizes, vec![10]);
        assert!(close(&errors.free_energy, &[0.1]));
        assert!(close(&errors.energy, &[0.2]));
    }

    #[test]
    fn load_file_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXAMPLE.as_bytes()).unwrap();
        let ds = load_file(file.path(), Columns::default()).unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn loading_twice_is_idempotent() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXAMPLE.as_bytes()).unwrap();
        let first = load_file(file.path(), Columns::default()).unwrap();
        let second = load_file(file.path(), Columns::default()).unwrap();
        assert_eq!(first.finite_size_errors(), second.finite_size_errors());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.dat"), Columns::default()).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
