//! # Small-body catalog reader
//!
//! Reads the designator list of a batch from a CSV export of a small-body database, e.g.
//!
//! ```text
//! spkid,full_name,a,e
//! 20000433,"   433 Eros (A898 PA)",1.458,0.2228
//! 54481740,"  (2014 PL51)",2.71,0.12
//! ```
//!
//! The first row is a header, the first column of every other row is the designator.
//! Blank rows and rows with an empty first column are ignored; extra columns may vary in count.
use std::io::Read;

use camino::Utf8Path;
use csv::{ReaderBuilder, Trim};

use crate::{constants::Designator, ephem_errors::EphemError};

/// Read the designators of a CSV catalog from any reader.
///
/// Argument
/// --------
/// * `reader`: CSV content with a header row
///
/// Return
/// ------
/// * the designators in file order, or [`EphemError::CsvError`] on malformed CSV
pub fn read_designators<R: Read>(reader: R) -> Result<Vec<Designator>, EphemError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut designators = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        match record.get(0) {
            Some(des) if !des.is_empty() => designators.push(des.to_string()),
            _ => continue,
        }
    }
    Ok(designators)
}

/// Read the designators of a CSV catalog file.
///
/// Argument
/// --------
/// * `path`: path of the CSV file
///
/// Return
/// ------
/// * the designators in file order, or an I/O / CSV error
pub fn read_catalog_file(path: &Utf8Path) -> Result<Vec<Designator>, EphemError> {
    let file = std::fs::File::open(path)?;
    read_designators(file)
}

#[cfg(test)]
mod catalog_reader_test {
    use super::*;

    #[test]
    fn test_read_designators() {
        let csv = "spkid,full_name,a\n\
                   20000433,\"   433 Eros (A898 PA)\",1.458\n\
                   \n\
                   54481740,\"  (2014 PL51)\"\n\
                   ,no id,3.0\n";
        let designators = read_designators(csv.as_bytes()).unwrap();
        assert_eq!(designators, vec!["20000433", "54481740"]);
    }

    #[test]
    fn test_header_only() {
        let designators = read_designators("spkid\n".as_bytes()).unwrap();
        assert!(designators.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = read_catalog_file(Utf8Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, EphemError::IoError(_)));
    }
}
