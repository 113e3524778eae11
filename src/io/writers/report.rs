use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::api::BatchReport;
use crate::error::Result;

/// Write a batch report as a pretty JSON sidecar
pub fn write_report_sidecar(report: &BatchReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_carries_counts_and_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run").join("report.json");
        let mut report = BatchReport::new(3);
        report.fetched = 2;
        report.rows_added = 17;
        report.finish(17);

        write_report_sidecar(&report, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["total"], 3);
        assert_eq!(json["fetched"], 2);
        assert_eq!(json["table_rows"], 17);
        assert!(json["started_at"].is_string());
        assert!(json["finished_at"].is_string());
    }
}
