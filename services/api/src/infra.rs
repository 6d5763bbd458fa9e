use chrono::{DateTime, Utc};
use lead_scoring::error::AppError;
use lead_scoring::import::{leads_from_json, LeadCsvImporter};
use lead_scoring::scoring::{LeadRecord, LeadScoringEngine};
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<LeadScoringEngine>,
}

/// Reads leads from a `.csv` sheet export or a JSON file holding one lead or an array of them.
pub(crate) fn load_leads(path: &Path) -> Result<Vec<LeadRecord>, AppError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        return LeadCsvImporter::from_path(path).map_err(AppError::from);
    }

    let raw = fs::read_to_string(path)?;
    Ok(leads_from_json(&raw)?)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| format!("invalid timestamp '{raw}': {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_scoring::import::ImportError;
    use std::path::PathBuf;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{name}", std::process::id()));
        fs::write(&path, contents).expect("scratch file writes");
        path
    }

    #[test]
    fn loads_json_files_by_default() {
        let path = scratch_file(
            "leads.json",
            r#"[{"email":"a@initech.com"},{"email":"b@initech.com"}]"#,
        );
        let leads = load_leads(&path).expect("json file loads");
        fs::remove_file(&path).ok();

        assert_eq!(leads.len(), 2);
        assert_eq!(leads[1].email, "b@initech.com");
    }

    #[test]
    fn invalid_json_is_an_import_error() {
        let path = scratch_file("broken.json", "{not json");
        let err = load_leads(&path).expect_err("malformed file rejected");
        fs::remove_file(&path).ok();

        assert!(matches!(err, AppError::Import(ImportError::Json(_))));
        assert!(err.to_string().contains("invalid lead JSON data"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_leads(Path::new("/nonexistent/leads.json")).expect_err("missing file");
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn timestamps_must_be_rfc3339() {
        assert!(parse_timestamp("2025-10-01T09:00:00Z").is_ok());
        assert!(parse_timestamp("yesterday").is_err());
    }
}
