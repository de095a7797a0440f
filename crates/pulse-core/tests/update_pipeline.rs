mod common;

use common::RecordingRunner;
use pulse_core::pipeline::run_update;
use pulse_core::{NextStack, PulseError, StepOutcome};
use tempfile::TempDir;

const MANIFEST: &str = r#"{
  "name": "demo",
  "dependencies": {
    "next": "13.0.0",
    "react": "18.0.0"
  }
}"#;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("package.json"), MANIFEST).unwrap();
    dir
}

#[tokio::test]
async fn test_update_reports_versions_then_upgrades() {
    let dir = project();
    let locks = TempDir::new().unwrap();
    let settings = common::test_settings(locks.path());
    let runner = RecordingRunner::new(|_| StepOutcome::Success);

    let report = run_update(&NextStack, &settings, &runner, dir.path())
        .await
        .unwrap();

    let versions: Vec<(String, Option<String>)> = report
        .versions
        .iter()
        .map(|v| (v.name.clone(), v.version.clone()))
        .collect();
    assert_eq!(
        versions,
        vec![
            ("next".to_string(), Some("13.0.0".to_string())),
            ("react".to_string(), Some("18.0.0".to_string())),
            ("react-dom".to_string(), None),
        ]
    );

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].command_line(),
        "pnpm up next react react-dom eslint-config-next --latest"
    );
    assert_eq!(calls[0].cwd(), dir.path());

    // the tool never edits the manifest itself
    assert_eq!(
        std::fs::read_to_string(dir.path().join("package.json")).unwrap(),
        MANIFEST
    );
}

#[tokio::test]
async fn test_failed_upgrade_is_update_failure() {
    let dir = project();
    let locks = TempDir::new().unwrap();
    let settings = common::test_settings(locks.path());
    let runner = RecordingRunner::new(|_| StepOutcome::ExitFailure(1));

    let err = run_update(&NextStack, &settings, &runner, dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, PulseError::UpdateFailed(_)));
    assert_eq!(err.exit_code(), pulse_core::error::EXIT_UPDATE_FAILED);
}

#[tokio::test]
async fn test_missing_manifest_stops_before_upgrade() {
    let dir = TempDir::new().unwrap();
    let locks = TempDir::new().unwrap();
    let settings = common::test_settings(locks.path());
    let runner = RecordingRunner::new(|_| StepOutcome::Success);

    let err = run_update(&NextStack, &settings, &runner, dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, PulseError::Read { .. }));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_manifest_stops_before_upgrade() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("package.json"), "{ nope").unwrap();
    let locks = TempDir::new().unwrap();
    let settings = common::test_settings(locks.path());
    let runner = RecordingRunner::new(|_| StepOutcome::Success);

    let err = run_update(&NextStack, &settings, &runner, dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, PulseError::Parse { .. }));
    assert!(runner.calls().is_empty());
}
