//! Unit tests for the upgrade status state machine

use dbup::database::{Outcome, ReportStatus, Status, StatusReport, DB_UPGRADE_STAGE, DB_VERSION};
use dbup::{MemoryStore, OptionsStore};
use serde_json::json;

use crate::helpers::{store_with_version, two_stages, upgraders_from, TEST_TARGET};

fn status(store: &MemoryStore) -> Status<'_, MemoryStore> {
    Status::new(store, TEST_TARGET)
}

/// Completed and remaining never share a stage.
fn assert_disjoint(store: &MemoryStore) {
    let session = status(store).session().unwrap();
    for stage in &session.completed_stages {
        assert!(
            !session.remaining_stages.contains(stage),
            "{} is both completed and remaining",
            stage
        );
    }
}

#[test]
fn advancing_moves_head_to_completed() {
    let store = store_with_version("1.0");
    let s = status(&store);
    s.start_upgrade(&two_stages()).unwrap();
    assert_eq!(s.get_current_stage().unwrap().as_deref(), Some("a_stage"));

    assert!(s.set_next_stage().unwrap());
    let session = s.session().unwrap();
    assert_eq!(session.stage.as_deref(), Some("b_stage"));
    assert_eq!(session.completed_stages, vec!["a_stage"]);
    assert_eq!(session.remaining_stages, vec!["b_stage"]);
    assert_disjoint(&store);
}

#[test]
fn drained_session_stays_in_progress_until_finish() {
    let store = store_with_version("1.0");
    let s = status(&store);
    s.start_upgrade(&two_stages()).unwrap();
    s.set_next_stage().unwrap();
    s.set_next_stage().unwrap();

    assert_eq!(s.get_current_stage().unwrap(), None);
    assert!(s.is_running().unwrap());
    let report = s.get_json(None).unwrap();
    assert!(report.in_progress);
    assert_eq!(report.complete, Some(100.0));

    // Nothing left to advance
    assert!(!s.set_next_stage().unwrap());
    assert_disjoint(&store);
}

#[test]
fn finish_reports_once_then_ok() {
    let store = store_with_version("1.0");
    let s = status(&store);
    s.start_upgrade(&two_stages()).unwrap();
    s.set_next_stage().unwrap();
    s.set_next_stage().unwrap();
    assert!(s.finish().unwrap());

    let report = s.get_json(None).unwrap();
    assert_eq!(report.status, ReportStatus::FinishUpdate);
    assert_eq!(report.complete, Some(100.0));
    assert!(!report.in_progress);

    assert_eq!(
        s.get_json(None).unwrap(),
        StatusReport::new(ReportStatus::Ok, false)
    );
    assert_eq!(s.current_version().unwrap().as_deref(), Some(TEST_TARGET));
}

#[test]
fn finish_twice_is_rejected() {
    let store = store_with_version("1.0");
    let s = status(&store);
    s.start_upgrade(&two_stages()).unwrap();
    assert!(s.finish().unwrap());
    assert!(!s.finish().unwrap());
}

fn idle(_: &Status<'_, MemoryStore>) {}

fn running(s: &Status<'_, MemoryStore>) {
    s.start_upgrade(&two_stages()).unwrap();
}

fn errored(s: &Status<'_, MemoryStore>) {
    running(s);
    s.set_error("boom", &Vec::<String>::new).unwrap();
}

fn finished(s: &Status<'_, MemoryStore>) {
    running(s);
    s.finish().unwrap();
}

#[test]
fn stop_resets_from_every_state() {
    let setups: [fn(&Status<'_, MemoryStore>); 4] = [idle, running, errored, finished];

    for setup in setups {
        let store = store_with_version("1.0");
        let s = status(&store);
        setup(&s);
        s.stop_update().unwrap();

        assert_eq!(s.get_current_stage().unwrap(), None);
        assert!(!s.get_json(None).unwrap().in_progress);
        assert!(!store.get().unwrap().contains_key(DB_UPGRADE_STAGE));
    }
}

#[test]
fn error_debug_ends_with_exactly_one_stage_line() {
    let store = store_with_version("1.0");
    let s = status(&store);
    s.start_upgrade(&two_stages()).unwrap();
    s.set_next_stage().unwrap();

    let schema = || vec!["CREATE TABLE a".to_string(), "CREATE TABLE b".to_string()];
    s.set_error("first", &schema).unwrap();
    s.set_error("second", &schema).unwrap();

    let report = s.get_json(None).unwrap();
    assert_eq!(report.result, Some(Outcome::Error));
    assert_eq!(report.reason.as_deref(), Some("second"));
    assert_eq!(
        report.debug.unwrap(),
        vec!["CREATE TABLE a", "CREATE TABLE b", "Stage: b_stage"]
    );
}

#[test]
fn error_while_drained_names_no_stage() {
    let store = store_with_version("1.0");
    let s = status(&store);
    s.start_upgrade(&two_stages()).unwrap();
    s.set_next_stage().unwrap();
    s.set_next_stage().unwrap();
    s.set_error("late failure", &Vec::<String>::new).unwrap();

    let debug = s.session().unwrap().debug;
    assert_eq!(debug, vec!["Stage: -"]);
}

#[test]
fn ok_clears_previous_error() {
    let store = store_with_version("1.0");
    let s = status(&store);
    s.start_upgrade(&two_stages()).unwrap();
    s.set_error("boom", &Vec::<String>::new).unwrap();
    s.set_ok("recovered").unwrap();

    let report = s.get_json(None).unwrap();
    assert_eq!(report.result, Some(Outcome::Ok));
    assert!(report.debug.is_none());
}

#[test]
fn install_without_version_reports_dash() {
    let store = MemoryStore::new();
    let s = status(&store);
    s.start_install(&upgraders_from("")).unwrap();

    let report = s.get_json(None).unwrap();
    assert_eq!(report.status, ReportStatus::NeedInstall);
    assert_eq!(report.current.as_deref(), Some("-"));
    assert_eq!(report.next.as_deref(), Some(TEST_TARGET));
    assert!(report.in_progress);
}

#[test]
fn idle_needs_install_without_session() {
    let store = MemoryStore::new();
    let s = status(&store);
    assert!(s.needs_installing().unwrap());
    assert!(!s.needs_updating().unwrap());
    assert_eq!(s.get_json(None).unwrap().status, ReportStatus::NeedInstall);
    assert!(!s.is_running().unwrap());
}

#[test]
fn idle_needs_update_when_behind() {
    let store = store_with_version("2.4");
    let s = status(&store);
    assert!(s.needs_updating().unwrap());
    let report = s.get_json(None).unwrap();
    assert_eq!(report.status, ReportStatus::NeedUpdate);
    assert!(report.complete.is_none());
    assert!(report.time.is_none());
}

#[test]
fn newer_install_than_target_is_ok() {
    let store = store_with_version("10.1");
    assert_eq!(
        status(&store).get_json(None).unwrap(),
        StatusReport::new(ReportStatus::Ok, false)
    );
}

#[test]
fn explicit_reason_overrides_stored_one() {
    let store = store_with_version("1.0");
    let s = status(&store);
    s.start_upgrade(&two_stages()).unwrap();
    s.set_ok("stored").unwrap();

    assert_eq!(
        s.get_json(Some("override")).unwrap().reason.as_deref(),
        Some("override")
    );
    assert_eq!(s.get_json(None).unwrap().reason.as_deref(), Some("stored"));
}

#[test]
fn progress_is_rounded_to_one_decimal() {
    let store = store_with_version("1.0");
    let s = status(&store);
    s.start_upgrade(&upgraders_from("4.1")).unwrap();
    s.set_next_stage().unwrap();

    // 1 of 3 stages in the 4.2 upgrade
    assert_eq!(s.get_json(None).unwrap().complete, Some(33.3));
}

#[test]
fn starting_again_replaces_the_session() {
    let store = store_with_version("1.0");
    let s = status(&store);
    s.start_upgrade(&two_stages()).unwrap();
    s.set_next_stage().unwrap();
    s.set_error("boom", &Vec::<String>::new).unwrap();

    s.start_upgrade(&two_stages()).unwrap();
    let session = s.session().unwrap();
    assert!(session.completed_stages.is_empty());
    assert_eq!(session.stage.as_deref(), Some("a_stage"));
    assert_eq!(session.result, Outcome::None);
    assert!(session.debug.is_empty());
}

#[test]
fn persisted_record_uses_wire_names() {
    let store = store_with_version("1.0");
    let s = status(&store).with_manual(true);
    s.start_install(&two_stages()).unwrap();

    let options = store.get().unwrap();
    let record = &options[DB_UPGRADE_STAGE];
    assert_eq!(record["mode"], json!("install"));
    assert_eq!(record["stage"], json!("a_stage"));
    assert_eq!(record["remainingStages"], json!(["a_stage", "b_stage"]));
    assert_eq!(record["manual"], json!(true));
    assert!(record["time"].as_i64().unwrap() > 0);
    assert_eq!(options[DB_VERSION], json!("1.0"));
}
