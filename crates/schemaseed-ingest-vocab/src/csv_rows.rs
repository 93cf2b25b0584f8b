//! Reading vocabulary tables.
//!
//! Columns are matched by header name; unrecognized columns are ignored and
//! empty cells are treated as absent. The only failures are I/O errors and
//! records that cannot be read at all (or lack an `id`).

use crate::rows::{IdentifierList, PropertyRow, TypeRow};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed record{}: {source}", line_suffix(.line))]
    Csv {
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },
    #[error("record on line {line} has no id")]
    MissingId { line: u64 },
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" on line {l}")).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct TypeRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default, rename = "comment", alias = "description")]
    comment: Option<String>,
    #[serde(default, rename = "subTypes")]
    sub_types: Option<String>,
    #[serde(default, rename = "subTypeOf")]
    sub_type_of: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PropertyRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default, rename = "comment", alias = "description")]
    comment: Option<String>,
    #[serde(default, rename = "domainIncludes")]
    domain_includes: Option<String>,
    #[serde(default, rename = "rangeIncludes")]
    range_includes: Option<String>,
}

pub fn read_type_rows(path: &Path) -> Result<Vec<TypeRow>, IngestError> {
    let rows = read_type_rows_from(open(path)?)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "read type rows");
    Ok(rows)
}

pub fn read_property_rows(path: &Path) -> Result<Vec<PropertyRow>, IngestError> {
    let rows = read_property_rows_from(open(path)?)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "read property rows");
    Ok(rows)
}

pub fn read_type_rows_from<R: Read>(reader: R) -> Result<Vec<TypeRow>, IngestError> {
    read_records(reader, |record: TypeRecord, line| {
        Ok(TypeRow {
            id: require_id(record.id, line)?,
            label: record.label,
            description: record.comment,
            sub_types: IdentifierList::from_cell(record.sub_types.as_deref()),
            sub_type_of: IdentifierList::from_cell(record.sub_type_of.as_deref()),
        })
    })
}

pub fn read_property_rows_from<R: Read>(reader: R) -> Result<Vec<PropertyRow>, IngestError> {
    read_records(reader, |record: PropertyRecord, line| {
        Ok(PropertyRow {
            id: require_id(record.id, line)?,
            label: record.label,
            description: record.comment,
            domain_includes: IdentifierList::from_cell(record.domain_includes.as_deref()),
            range_includes: IdentifierList::from_cell(record.range_includes.as_deref()),
        })
    })
}

fn open(path: &Path) -> Result<File, IngestError> {
    File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn require_id(id: Option<String>, line: u64) -> Result<String, IngestError> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(IngestError::MissingId { line }),
    }
}

fn read_records<R, T, Row, F>(reader: R, mut convert: F) -> Result<Vec<Row>, IngestError>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut(T, u64) -> Result<Row, IngestError>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers().map_err(csv_error)?.clone();

    let mut out = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let parsed: T = record.deserialize(Some(&headers)).map_err(csv_error)?;
        out.push(convert(parsed, line)?);
    }
    Ok(out)
}

fn csv_error(source: csv::Error) -> IngestError {
    IngestError::Csv {
        line: source.position().map(|p| p.line()),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPES_CSV: &str = "\
id,label,comment,subTypeOf,enumerationtype,equivalentClass,properties,subTypes,supersedes,supersededBy,isPartOf
http://schema.org/Thing,Thing,\"The most generic type of item.\",,,,,\"http://schema.org/Person, http://schema.org/Place\",,,
http://schema.org/Person,Person,\"A person (alive, dead, undead, or fictional).\",http://schema.org/Thing,,,,,,,
";

    const PROPERTIES_CSV: &str = "\
id,label,comment,subPropertyOf,equivalentProperty,subproperties,domainIncludes,rangeIncludes,inverseOf,supersedes,supersededBy,isPartOf
http://schema.org/worksFor,worksFor,Organizations that the person works for.,,,,http://schema.org/Person,http://schema.org/Organization,,,,
http://schema.org/lonely,lonely,,,,,,,,,,
";

    #[test]
    fn reads_type_rows_with_quoted_lists() {
        let rows = read_type_rows_from(TYPES_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "http://schema.org/Thing");
        assert_eq!(
            rows[0].sub_types.iter().collect::<Vec<_>>(),
            vec!["http://schema.org/Person", "http://schema.org/Place"]
        );
        assert!(rows[0].sub_type_of.is_empty());
        assert_eq!(
            rows[1].description.as_deref(),
            Some("A person (alive, dead, undead, or fictional).")
        );
    }

    #[test]
    fn empty_cells_are_absent() {
        let rows = read_property_rows_from(PROPERTIES_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].domain_includes.single(), Some("http://schema.org/Person"));
        assert_eq!(rows[1].description, None);
        assert!(rows[1].domain_includes.is_empty());
        assert!(rows[1].range_includes.is_empty());
    }

    #[test]
    fn description_header_is_accepted() {
        let csv = "id,label,description\nA,Alpha,First letter\n";
        let rows = read_type_rows_from(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].description.as_deref(), Some("First letter"));
        assert!(rows[0].sub_types.is_empty());
    }

    #[test]
    fn blank_id_is_an_ingestion_error() {
        let csv = "id,label\nA,Alpha\n,Nameless\n";
        let err = read_type_rows_from(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::MissingId { line: 3 }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_type_rows(Path::new("/nonexistent/types.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/types.csv"));
    }
}
