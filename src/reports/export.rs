use csv::Writer;
use tracing::{info, warn};

use crate::error::RoiError;
use crate::history::History;

pub const DEFAULT_EXPORT_PATH: &str = "roi_history.csv";

#[derive(Debug, PartialEq)]
pub enum ExportOutcome {
    /// The history was empty; the target file was not touched.
    Nothing,
    Written { rows: usize },
}

/// Writes the history to `path` as `investment,profit,roi` rows with the
/// unrounded values, replacing any existing file.
pub fn export(history: &History, path: &str) -> Result<ExportOutcome, RoiError> {
    if history.is_empty() {
        return Ok(ExportOutcome::Nothing);
    }

    write_records(history, path).map_err(|source| {
        warn!(path = %path, error = %source, "history export failed");
        RoiError::Export {
            path: path.to_string(),
            source,
        }
    })?;

    info!(path = %path, rows = history.len(), "history exported");
    Ok(ExportOutcome::Written {
        rows: history.len(),
    })
}

fn write_records(history: &History, path: &str) -> Result<(), csv::Error> {
    let mut writer = Writer::from_path(path)?;
    for record in history.all().iter() {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::history::InvestmentRecord;

    fn sample_history() -> History {
        let mut history = History::new();
        history.append(InvestmentRecord::new(100.0, 150.0).unwrap());
        history.append(InvestmentRecord::new(200.0, 180.0).unwrap());
        history.append(InvestmentRecord::new(3.0, 4.0).unwrap());
        history
    }

    #[test]
    fn empty_history_does_not_touch_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roi_history.csv");
        let path = path.to_str().unwrap();

        let outcome = export(&History::new(), path).unwrap();
        assert_eq!(outcome, ExportOutcome::Nothing);
        assert!(!dir.path().join("roi_history.csv").exists());
    }

    #[test]
    fn writes_header_and_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let history = sample_history();

        let outcome = export(&history, path.to_str().unwrap()).unwrap();
        assert_eq!(outcome, ExportOutcome::Written { rows: 3 });

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), history.len() + 1);
        assert_eq!(lines[0], "investment,profit,roi");
        assert_eq!(lines[1], "100.0,150.0,50.0");
        assert_eq!(lines[2], "200.0,180.0,-10.0");
    }

    #[test]
    fn values_are_not_rounded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        export(&sample_history(), path.to_str().unwrap()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<(f64, f64, f64)> = reader.deserialize().map(|r| r.unwrap()).collect();
        let (_, _, roi) = rows[2];
        assert_eq!(roi, (4.0 - 3.0) / 3.0 * 100.0);
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale\ncontent\nthat\nis\nlonger\n").unwrap();

        let mut history = History::new();
        history.append(InvestmentRecord::new(50.0, 75.0).unwrap());
        export(&history, path.to_str().unwrap()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(!contents.contains("stale"));
    }

    #[test]
    fn unwritable_path_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let err = export(&sample_history(), path.to_str().unwrap()).unwrap_err();
        match err {
            RoiError::Export { path: failed, .. } => assert!(failed.ends_with("out.csv")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
