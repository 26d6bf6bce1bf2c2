//! Plain-text export of aggregated dashboard data.

use crate::aggregator::GroupedPoint;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;
use vibecheck_common::{Result, VibeCheckError};

/// Renders `points` as the dashboard text report.
///
/// Each period contributes its label followed by a colon, one indented
/// `emotion: count` line per emotion present, and a blank line.
pub fn render_report(points: &[GroupedPoint]) -> String {
    let mut out = String::new();
    for point in points {
        let _ = writeln!(out, "{}:", point.label());
        for entry in point.counts() {
            let _ = writeln!(out, "  {}: {}", entry.emotion.label(), entry.count);
        }
        out.push('\n');
    }
    out
}

/// Writes the report for `points` to `path`.
///
/// Fails without touching the file when there is nothing to export.
pub fn export_report(points: &[GroupedPoint], path: impl AsRef<Path>) -> Result<()> {
    if points.is_empty() {
        return Err(VibeCheckError::validation("Não há dados para exportar."));
    }

    let path = path.as_ref();
    std::fs::write(path, render_report(points))?;
    info!("Exported {} periods to {}", points.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate;
    use vibecheck_common::test_utils::fixtures;
    use vibecheck_common::AggregationPeriod;

    #[test]
    fn test_render_report() {
        let points = aggregate(&fixtures::june_records(), AggregationPeriod::Day, None, None);
        let report = render_report(&points);

        assert_eq!(
            report,
            "01/06:\n  Muito Feliz: 1\n\n02/06:\n  Muito Feliz: 1\n\n03/06:\n  Feliz: 1\n\n"
        );
    }

    #[test]
    fn test_render_empty_report() {
        assert_eq!(render_report(&[]), "");
    }

    #[test]
    fn test_export_rejects_empty_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dados_grafico.txt");

        let err = export_report(&[], &path).unwrap_err();
        assert!(matches!(err, VibeCheckError::Validation { .. }));
        assert!(!path.exists());
    }
}
