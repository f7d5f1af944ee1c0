use anyhow::Result;
use httpmock::prelude::*;
use nbf_import::core::Reporter;
use nbf_import::{ImportApp, ImportError, ImportOutcome, TomlConfig};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct RecordingReporter(Arc<Mutex<Vec<Option<String>>>>);

impl RecordingReporter {
    fn messages(&self) -> Vec<Option<String>> {
        self.0.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, outcome: &ImportOutcome) {
        self.0.lock().unwrap().push(outcome.user_message());
    }
}

fn config(base_url: &str, user_agent: &str, extra: &str) -> Result<TomlConfig> {
    let toml_content = format!(
        r#"
[app]
user_agent = "{}"

[backend]
base_url = "{}"
csrf_token = "csrf-123"

{}
"#,
        user_agent, base_url, extra
    );
    Ok(TomlConfig::from_toml_str(&toml_content)?)
}

fn write_csv(dir: &TempDir, name: &str, content: &str) -> Result<String> {
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok(path.to_string_lossy().into_owned())
}

#[tokio::test]
async fn test_end_to_end_import_posts_entries() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file = write_csv(
        &temp_dir,
        "metrics.csv",
        "date,metric,value,unit\n2024-01-01,sales,100,usd\n\n2024-01-02,weight,81.4,\n",
    )?;

    let server = MockServer::start();
    let import_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/import")
            .header("x-csrf-token", "csrf-123")
            .json_body(serde_json::json!({
                "entries": [
                    {"date": "2024-01-01", "metric": "sales", "value": 100.0, "unit": "usd"},
                    {"date": "2024-01-02", "metric": "weight", "value": 81.4, "unit": null}
                ]
            }));
        then.status(201);
    });

    let config = config(&server.base_url(), "Mozilla/5.0 NBFAPP/1.0", "")?;
    let reporter = RecordingReporter::default();
    let app = ImportApp::from_settings(&config, Some(file.as_str()), reporter.clone())?;

    assert!(app.is_native_context());
    let outcome = app.import_csv_file().await;

    import_mock.assert();
    assert!(matches!(&outcome, ImportOutcome::Succeeded(m) if m == "imported 2 entries"));
    assert_eq!(
        reporter.messages(),
        vec![Some("SUCCESS: imported 2 entries".to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn test_invalid_header_never_reaches_backend() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file = write_csv(&temp_dir, "bad.csv", "day,amount\n2024-01-01,3\n")?;

    let server = MockServer::start();
    let import_mock = server.mock(|when, then| {
        when.method(POST).path("/api/import");
        then.status(200);
    });

    let config = config(&server.base_url(), "NBFAPP", "")?;
    let reporter = RecordingReporter::default();
    let app = ImportApp::from_settings(&config, Some(file.as_str()), reporter.clone())?;

    let outcome = app.pick_and_import_csv().await;

    assert!(matches!(
        &outcome,
        ImportOutcome::RejectedInvalid(m) if m == "Missing required header(s): date, metric, value"
    ));
    import_mock.assert_hits(0);
    assert_eq!(reporter.messages().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_oversized_file_fails_before_validation() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file = write_csv(
        &temp_dir,
        "big.csv",
        "date,metric,value\n2024-01-01,steps,12000\n2024-01-02,steps,9000\n",
    )?;

    let server = MockServer::start();
    let import_mock = server.mock(|when, then| {
        when.method(POST).path("/api/import");
        then.status(200);
    });

    let config = config(&server.base_url(), "NBFAPP", "[bridge]\nmax_bytes = 16")?;
    let app = ImportApp::from_settings(&config, Some(file.as_str()), RecordingReporter::default())?;

    let outcome = app.import_csv_file().await;

    assert!(matches!(
        outcome,
        ImportOutcome::Failed(ImportError::ReadError { ref message }) if message == "File too large"
    ));
    import_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_browser_user_agent_is_unavailable() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file = write_csv(&temp_dir, "m.csv", "date,metric,value\n2024-01-01,x,1\n")?;

    let config = config("http://127.0.0.1:9", "Mozilla/5.0 Safari/605.1.15", "")?;
    let reporter = RecordingReporter::default();
    let app = ImportApp::from_settings(&config, Some(file.as_str()), reporter.clone())?;

    assert!(!app.is_native_context());
    let outcome = app.import_csv_file().await;

    assert!(matches!(outcome, ImportOutcome::Failed(ImportError::EnvironmentUnavailable)));
    assert_eq!(
        reporter.messages(),
        vec![Some("App features unavailable in browser.".to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn test_validate_only_mode_does_not_submit() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file = write_csv(&temp_dir, "m.csv", "date,metric,value\n2024-01-01,x,1\n")?;

    let server = MockServer::start();
    let import_mock = server.mock(|when, then| {
        when.method(POST).path("/api/import");
        then.status(200);
    });

    let config = config(&server.base_url(), "NBFAPP", "[pipeline]\nsubmit = false")?;
    let reporter = RecordingReporter::default();
    let app = ImportApp::from_settings(&config, Some(file.as_str()), reporter.clone())?;

    let outcome = app.import_csv_file().await;

    assert!(matches!(&outcome, ImportOutcome::Succeeded(m) if m == "1 data rows, 3 columns"));
    import_mock.assert_hits(0);
    assert_eq!(
        reporter.messages(),
        vec![Some("SUCCESS: 1 data rows, 3 columns".to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn test_backend_failure_is_reported() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file = write_csv(&temp_dir, "m.csv", "date,metric,value\n2024-01-01,x,1\n")?;

    let server = MockServer::start();
    let import_mock = server.mock(|when, then| {
        when.method(POST).path("/api/import");
        then.status(500).body("database unavailable");
    });

    let config = config(&server.base_url(), "NBFAPP", "")?;
    let reporter = RecordingReporter::default();
    let app = ImportApp::from_settings(&config, Some(file.as_str()), reporter.clone())?;

    let outcome = app.import_csv_file().await;

    import_mock.assert_hits(1);
    assert!(matches!(
        outcome,
        ImportOutcome::Failed(ImportError::SubmissionError { status: Some(500), .. })
    ));
    let messages = reporter.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0]
        .as_deref()
        .unwrap_or_default()
        .starts_with("Import failed: Submission failed"));
    Ok(())
}
