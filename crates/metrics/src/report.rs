use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::aggregate::AggregateRecord;
use crate::error::Result;

/// Append one record to the on-disk JSON array.
///
/// The file is grown in place: an empty or missing file receives the opening
/// `[` before its first record, a non-empty file a `,` separator. The closing
/// `]` is never written here; until [`finalize_report`] runs, the file is a
/// JSON array missing its terminator.
pub fn append_record(path: &Path, record: &AggregateRecord) -> Result<()> {
    let json = serde_json::to_string(record)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let separator = if file.metadata()?.len() == 0 { "[" } else { "," };
    write!(file, "{separator}{json}")?;
    Ok(())
}

/// Terminate the JSON array so the report parses as-is. An empty or missing
/// file becomes an empty array.
pub fn finalize_report(path: &Path) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if file.metadata()?.len() == 0 {
        write!(file, "[]")?;
    } else {
        write!(file, "]")?;
    }
    Ok(())
}

/// Read a report back, tolerating a file that has not been finalized.
pub fn read_report(path: &Path) -> Result<Vec<AggregateRecord>> {
    let mut contents = std::fs::read_to_string(path)?;
    let trimmed = contents.trim_end();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if !trimmed.ends_with(']') {
        contents.push(']');
    }
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::MetricScores;

    fn record(group: &str, value: f64) -> AggregateRecord {
        let scores = MetricScores {
            dice: value,
            fit: value,
            size: value,
            position: value,
        };
        AggregateRecord {
            group: group.to_owned(),
            min: scores,
            max: scores,
            mean: scores,
            std_dev: scores,
        }
    }

    #[test]
    fn two_appends_plus_manual_terminator_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resultados.json");

        append_record(&path, &record("first", 0.9)).unwrap();
        append_record(&path, &record("second", 0.8)).unwrap();

        let mut contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with('['));
        assert!(!contents.ends_with(']'));
        contents.push(']');

        let parsed: Vec<AggregateRecord> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].group, "first");
        assert_eq!(parsed[1].mean.dice, 0.8);
    }

    #[test]
    fn finalize_produces_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resultados.json");

        append_record(&path, &record("only", 0.5)).unwrap();
        finalize_report(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<AggregateRecord> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn finalize_of_an_empty_file_is_an_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resultados.json");
        finalize_report(&path).unwrap();
        let parsed = read_report(&path).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn read_report_tolerates_an_unfinalized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resultados.json");

        append_record(&path, &record("partial", 0.7)).unwrap();
        let parsed = read_report(&path).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].group, "partial");
    }
}
