//! CSV row types for entry, model, and dataset tables.

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tt_common::{parse_timestamp, BundleId, Entry, Error, Label, Result};

use crate::inference::Contributions;
use crate::learn::ScoredEntry;
use crate::resample::Dataset;

/// One input row: `project, description, tags, start, end, updated, duration, modified`.
///
/// Extra columns are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRecord {
    pub project: String,
    pub description: String,
    pub tags: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub updated: String,
    pub duration: String,
    pub modified: String,
}

impl EntryRecord {
    /// Convert into an [`Entry`], reporting failures against 1-based `row`.
    pub fn into_entry(self, row: usize) -> Result<Entry> {
        let invalid = |message: String| Error::InvalidRecord { row, message };

        let start = parse_timestamp(&self.start).map_err(|e| invalid(e.to_string()))?;
        let end = parse_timestamp(&self.end).map_err(|e| invalid(e.to_string()))?;
        let duration_ms = parse_duration(&self.duration)
            .ok_or_else(|| invalid(format!("invalid duration: {}", self.duration)))?;
        let modified: Label = self.modified.parse().map_err(invalid)?;

        Ok(Entry {
            project: self.project,
            description: self.description,
            tags: self.tags,
            start,
            end,
            updated: self.updated,
            duration_ms,
            modified,
        })
    }
}

impl From<&Entry> for EntryRecord {
    fn from(entry: &Entry) -> Self {
        EntryRecord {
            project: entry.project.clone(),
            description: entry.description.clone(),
            tags: entry.tags.clone(),
            start: entry.start.to_rfc3339(),
            end: entry.end.to_rfc3339(),
            updated: entry.updated.clone(),
            duration: entry.duration_ms.to_string(),
            modified: entry.modified.as_str().to_string(),
        }
    }
}

/// Milliseconds as an integer, or a float rounded to the nearest millisecond.
fn parse_duration(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(ms) = trimmed.parse::<i64>() {
        return Some(ms);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.round() as i64)
}

/// One `model.csv` row: the input columns plus the learned outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRecord {
    pub project: String,
    pub description: String,
    pub tags: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub updated: String,
    pub duration: String,
    pub modified: String,
    pub probability: f64,
    pub error: f64,
    pub entropy: f64,
    pub bundle: usize,
}

impl From<&ScoredEntry> for ModelRecord {
    fn from(scored: &ScoredEntry) -> Self {
        let base = EntryRecord::from(&scored.entry);
        ModelRecord {
            project: base.project,
            description: base.description,
            tags: base.tags,
            start: base.start,
            end: base.end,
            updated: base.updated,
            duration: base.duration,
            modified: base.modified,
            probability: scored.probability,
            error: scored.error,
            entropy: scored.entropy,
            bundle: scored.bundle.0,
        }
    }
}

impl ModelRecord {
    pub fn into_scored(self, row: usize) -> Result<ScoredEntry> {
        let entry = EntryRecord {
            project: self.project,
            description: self.description,
            tags: self.tags,
            start: self.start,
            end: self.end,
            updated: self.updated,
            duration: self.duration,
            modified: self.modified,
        }
        .into_entry(row)?;

        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(Error::InvalidRecord {
                row,
                message: format!("probability out of range: {}", self.probability),
            });
        }

        Ok(ScoredEntry {
            entry,
            probability: self.probability,
            error: self.error,
            entropy: self.entropy,
            bundle: BundleId(self.bundle),
            contributions: Contributions::default(),
        })
    }
}

/// One `datasets.csv` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Space-separated bundle ids.
    pub seeds: String,
    pub error: f64,
    pub entropy: f64,
    pub f1: f64,
    pub f2: f64,
}

impl From<&Dataset> for DatasetRecord {
    fn from(dataset: &Dataset) -> Self {
        let seeds: Vec<String> = dataset.seeds.iter().map(|id| id.to_string()).collect();
        DatasetRecord {
            seeds: seeds.join(" "),
            error: dataset.error,
            entropy: dataset.entropy,
            f1: dataset.f1,
            f2: dataset.f2,
        }
    }
}

impl DatasetRecord {
    pub fn into_dataset(self, row: usize) -> Result<Dataset> {
        let seeds = self
            .seeds
            .split_whitespace()
            .map(|s| s.parse::<usize>().map(BundleId))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::InvalidRecord {
                row,
                message: format!("invalid seeds: {}", e),
            })?;
        Ok(Dataset {
            seeds,
            error: self.error,
            entropy: self.entropy,
            f1: self.f1,
            f2: self.f2,
        })
    }
}

// Readers

pub fn read_entries<R: Read>(reader: R) -> Result<Vec<Entry>> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();
    for (idx, record) in csv.deserialize::<EntryRecord>().enumerate() {
        entries.push(record?.into_entry(idx + 1)?);
    }
    Ok(entries)
}

pub fn read_model<R: Read>(reader: R) -> Result<Vec<ScoredEntry>> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut scored = Vec::new();
    for (idx, record) in csv.deserialize::<ModelRecord>().enumerate() {
        scored.push(record?.into_scored(idx + 1)?);
    }
    Ok(scored)
}

pub fn read_datasets<R: Read>(reader: R) -> Result<Vec<Dataset>> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut datasets = Vec::new();
    for (idx, record) in csv.deserialize::<DatasetRecord>().enumerate() {
        datasets.push(record?.into_dataset(idx + 1)?);
    }
    Ok(datasets)
}

// Writers

pub fn write_entries<W: Write>(writer: W, entries: &[Entry]) -> Result<()> {
    write_rows(writer, entries.iter().map(EntryRecord::from))
}

pub fn write_model<'a, W, I>(writer: W, scored: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ScoredEntry>,
{
    write_rows(writer, scored.into_iter().map(ModelRecord::from))
}

pub fn write_datasets<W: Write>(writer: W, datasets: &[Dataset]) -> Result<()> {
    write_rows(writer, datasets.iter().map(DatasetRecord::from))
}

fn write_rows<W, T, I>(writer: W, rows: I) -> Result<()>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

// Path helpers

pub fn read_entries_from(path: &Path) -> Result<Vec<Entry>> {
    read_entries(open(path)?)
}

pub fn read_model_from(path: &Path) -> Result<Vec<ScoredEntry>> {
    read_model(open(path)?)
}

pub fn read_datasets_from(path: &Path) -> Result<Vec<Dataset>> {
    read_datasets(open(path)?)
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// Create `path` (and its parent directory) for writing.
pub fn create(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(std::fs::File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::entry_at;

    const INPUT: &str = "\
id,project,description,tags,start,end,updated,duration,modified
1,Research,Reading papers,,2018-03-01T09:00:00+00:00,2018-03-01T10:30:00+00:00,2018-03-01T10:31:00+00:00,5400000,False
2,Admin,Email,urgent,2018-03-01 13:00:00,2018-03-01 13:20:00,,1200000,True
";

    #[test]
    fn reads_input_rows_and_ignores_extra_columns() {
        let entries = read_entries(INPUT.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].project, "Research");
        assert_eq!(entries[0].tags, "");
        assert_eq!(entries[0].duration_ms, 5_400_000);
        assert_eq!(entries[0].modified, Label::NotModified);
        assert_eq!(entries[1].modified, Label::Modified);
        assert_eq!(entries[1].tags, "urgent");
    }

    #[test]
    fn bad_timestamp_reports_row() {
        let input = "\
project,description,tags,start,end,updated,duration,modified
A,B,,2018-03-01T09:00:00Z,2018-03-01T10:00:00Z,,1,True
A,B,,not-a-date,2018-03-01T10:00:00Z,,1,True
";
        match read_entries(input.as_bytes()) {
            Err(Error::InvalidRecord { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn bad_label_and_duration_are_invalid_records() {
        let label = "\
project,description,tags,start,end,updated,duration,modified
A,B,,2018-03-01T09:00:00Z,2018-03-01T10:00:00Z,,1,maybe
";
        assert!(matches!(
            read_entries(label.as_bytes()),
            Err(Error::InvalidRecord { row: 1, .. })
        ));

        let duration = "\
project,description,tags,start,end,updated,duration,modified
A,B,,2018-03-01T09:00:00Z,2018-03-01T10:00:00Z,,soon,True
";
        assert!(matches!(
            read_entries(duration.as_bytes()),
            Err(Error::InvalidRecord { row: 1, .. })
        ));
    }

    #[test]
    fn negative_and_float_durations_parse() {
        assert_eq!(parse_duration("-1500"), Some(-1500));
        assert_eq!(parse_duration("3600000.4"), Some(3_600_000));
        assert_eq!(parse_duration("NaN"), None);
    }

    #[test]
    fn model_rows_reload_with_bundle_ids() {
        let entry = entry_at("2018-03-01T09:00:00Z", Label::Modified);
        let scored = ScoredEntry {
            entry: entry.clone(),
            probability: 0.75,
            error: 0.0,
            entropy: 0.0,
            bundle: BundleId(4),
            contributions: Contributions::default(),
        };
        let mut buf = Vec::new();
        write_model(&mut buf, [&scored]).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with(
            "project,description,tags,start,end,updated,duration,modified,probability,error,entropy,bundle"
        ));

        let reloaded = read_model(buf.as_slice()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].bundle, BundleId(4));
        assert_eq!(reloaded[0].entry, entry);
        assert_eq!(reloaded[0].probability, 0.75);
    }

    #[test]
    fn dataset_seeds_are_space_separated() {
        let dataset = Dataset {
            seeds: vec![BundleId(2), BundleId(0), BundleId(2)],
            error: 0.1,
            entropy: 0.2,
            f1: 0.3,
            f2: 0.4,
        };
        let mut buf = Vec::new();
        write_datasets(&mut buf, std::slice::from_ref(&dataset)).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.contains("2 0 2,0.1,0.2,0.3,0.4"));
        assert_eq!(read_datasets(buf.as_slice()).unwrap(), vec![dataset]);
    }
}
