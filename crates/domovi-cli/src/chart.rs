//! `chart rebuild`: regenerate `chart.json` from the dated artifacts.

use std::path::Path;

use domovi_artifacts::rebuild_from_artifacts;

/// Rebuild the chart from every dated artifact under `data_dir`.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or the chart cannot
/// be written.
pub(crate) fn run_chart_rebuild(data_dir: &Path, dry_run: bool) -> anyhow::Result<()> {
    let report = rebuild_from_artifacts(data_dir)?;
    let chart_path = data_dir.join("chart.json");

    if !report.skipped.is_empty() {
        tracing::warn!(
            skipped = report.skipped.len(),
            "some dated artifacts carry no grand totals"
        );
    }

    if dry_run {
        println!(
            "dry-run: would write {} entries to {}",
            report.store.len(),
            chart_path.display()
        );
        return Ok(());
    }

    report.store.save(&chart_path)?;
    tracing::info!(
        path = %chart_path.display(),
        entries = report.store.len(),
        skipped = report.skipped.len(),
        "Chart rebuilt"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use domovi_artifacts::ChartStore;
    use serde_json::json;

    use super::*;

    #[test]
    fn rebuild_writes_sorted_chart() {
        let dir = tempfile::TempDir::new().unwrap();
        for (name, free) in [("2026-02-02.json", 2), ("2026-02-01.json", 1)] {
            let body = json!({
                "data": { "grandTotals": { "allApplications": { "freeSpots": free, "active": 10 } } },
                "_metadata": { "source": "s", "extractedAt": "t", "script": "x" }
            });
            std::fs::write(dir.path().join(name), body.to_string()).unwrap();
        }

        run_chart_rebuild(dir.path(), false).unwrap();

        let chart = ChartStore::load(&dir.path().join("chart.json")).unwrap();
        let dates: Vec<String> = chart.to_vec().into_iter().map(|e| e.date).collect();
        assert_eq!(dates, ["2026-02-01", "2026-02-02"]);
    }

    #[test]
    fn rebuild_dry_run_leaves_chart_alone() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("chart.json"), "[]").unwrap();
        std::fs::write(
            dir.path().join("2026-02-01.json"),
            r#"{"data":{"grandTotals":{"allApplications":{"freeSpots":1,"active":2}}}}"#,
        )
        .unwrap();

        run_chart_rebuild(dir.path(), true).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("chart.json")).unwrap(),
            "[]"
        );
    }

    #[test]
    fn rebuild_fails_for_missing_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(run_chart_rebuild(&dir.path().join("absent"), false).is_err());
    }
}
