// tests/dry_run.rs
#![cfg(unix)]

mod common;
use crate::common::*;

use proptest::prelude::*;

use cortex_action::exec::dry_run_log;
use cortex_action::types::Status;

fn touching_fake() -> FakeCortex {
    let fake = FakeCortex::new("touch \"$(dirname \"$0\")/executed\"").unwrap();
    assert!(!fake.path("executed").exists());
    fake
}

#[tokio::test]
async fn dry_run_build_reports_synthetic_line() -> TestResult {
    init_tracing();
    let fake = touching_fake();
    let log = RecordingLog::new();

    let request = RequestBuilder::new("build").dry_run(true).build();
    let result = with_timeout(fake.runner().run(&request, &log)).await;

    assert_eq!(result.status, Status::Success);
    assert_eq!(result.execution_log, "[DRY-RUN] cortex build --dry-run");
    assert!(result.error_message.is_none());
    assert_eq!(log.infos(), vec!["[DRY-RUN] cortex build --dry-run".to_string()]);
    assert!(!fake.path("executed").exists(), "dry-run must not spawn cortex");
    Ok(())
}

#[tokio::test]
async fn real_run_does_execute_the_fake() -> TestResult {
    init_tracing();
    let fake = touching_fake();
    let log = RecordingLog::new();

    let request = RequestBuilder::new("build").build();
    let result = with_timeout(fake.runner().run(&request, &log)).await;

    assert!(result.is_success());
    assert!(fake.path("executed").exists());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn dry_run_never_executes_and_always_succeeds(base in "[a-z][a-z0-9 -]{0,20}") {
        let fake = touching_fake();
        let log = RecordingLog::new();
        let request = RequestBuilder::new(&base)
            .dry_run(true)
            .api_key("SECRET_KEY_XYZ")
            .build();

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let result = rt.block_on(fake.runner().run(&request, &log));

        prop_assert_eq!(result.status, Status::Success);
        prop_assert_eq!(&result.execution_log, &format!("[DRY-RUN] cortex {base} --dry-run"));
        prop_assert_eq!(result.execution_log, dry_run_log(&base));
        prop_assert!(!fake.path("executed").exists());
    }
}
