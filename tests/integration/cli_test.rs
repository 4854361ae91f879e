//! End-to-end tests for the dbup binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;

use dbup::database::upgrades::LATEST_VERSION;

use crate::helpers::TestEnv;

#[test]
fn fresh_database_needs_install() {
    let env = TestEnv::new();
    let report = env.report(&["status"]);
    assert_eq!(report["status"], "need-install");
    assert_eq!(report["inProgress"], false);
    assert_eq!(report["current"], "-");
    assert_eq!(report["next"], LATEST_VERSION);
}

#[test]
fn status_does_not_create_options_file() {
    let env = TestEnv::new();
    env.cmd().arg("status").assert().success();
    assert!(!env.options.exists());
}

#[test]
fn upgrade_all_installs_then_status_is_ok() {
    let env = TestEnv::new();

    let report = env.report(&["upgrade", "--all"]);
    assert_eq!(report["status"], "finish-install");
    assert_eq!(report["complete"], 100.0);
    assert_eq!(report["manual"], true);

    assert_eq!(env.read_options()["database"], LATEST_VERSION);
    assert_eq!(
        env.report(&["status"]),
        json!({"status": "ok", "inProgress": false})
    );
}

#[test]
fn single_upgrade_runs_one_stage() {
    let env = TestEnv::new();
    env.write_options(json!({"database": "4.1"}));

    let report = env.report(&["upgrade"]);
    assert_eq!(report["status"], "need-update");
    assert_eq!(report["inProgress"], true);
    assert_eq!(report["result"], "ok");
    assert_eq!(report["complete"], 33.3);

    let stage = &env.read_options()["database_stage"];
    assert_eq!(stage["stage"], "remove_module_and_group_420");
    assert_eq!(stage["completedStages"], json!(["add_extra_logging_420"]));
}

#[test]
fn auto_flag_records_non_manual_run() {
    let env = TestEnv::new();
    env.write_options(json!({"database": "4.1"}));

    let report = env.report(&["upgrade", "--auto"]);
    assert_eq!(report["manual"], false);
}

#[test]
fn unrelated_options_are_preserved() {
    let env = TestEnv::new();
    env.write_options(json!({"database": "4.1", "monitor_post": 3, "flags": ["a"]}));

    env.cmd().args(["upgrade", "--all"]).assert().success();

    let options = env.read_options();
    assert_eq!(options["monitor_post"], 3);
    assert_eq!(options["flags"], json!(["a"]));
}

#[cfg(unix)]
#[test]
fn failing_stage_exits_non_zero_and_prints_report() {
    let env =
        TestEnv::with_executor_script("cat >/dev/null; echo \"Table doesn't exist\" >&2; exit 1");
    env.write_options(json!({"database": "4.1"}));

    let output = env.cmd().arg("upgrade").output().unwrap();
    assert!(!output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["result"], "error");
    assert_eq!(report["reason"], "Table doesn't exist");
    assert_eq!(
        report["debug"].as_array().unwrap().last().unwrap(),
        "Stage: add_extra_logging_420"
    );
}

#[cfg(unix)]
#[test]
fn skip_then_retry_after_failure() {
    let env = TestEnv::with_executor_script("cat >/dev/null; exit 2");
    env.write_options(json!({"database": "4.1"}));

    env.cmd().arg("upgrade").assert().failure();

    let report = env.report(&["skip"]);
    assert_eq!(report["result"], "ok");
    assert_eq!(report["reason"], "Skipped stage add_extra_logging_420");

    // The next stage fails the same way
    env.cmd().arg("retry").assert().failure();
    let stage = &env.read_options()["database_stage"];
    assert_eq!(stage["stage"], "remove_module_and_group_420");
    assert_eq!(stage["result"], "error");
}

#[test]
fn stop_clears_session() {
    let env = TestEnv::new();
    env.write_options(json!({"database": "4.0"}));
    env.cmd().arg("upgrade").assert().success();

    let report = env.report(&["stop"]);
    assert_eq!(report["inProgress"], false);
    assert_eq!(report["status"], "need-update");
    assert!(env.read_options().get("database_stage").is_none());
}

#[test]
fn stages_lists_catalog() {
    let env = TestEnv::new();
    env.cmd()
        .arg("stages")
        .assert()
        .success()
        .stdout(predicate::str::contains("create_tables"))
        .stdout(predicate::str::contains("add_title_201"))
        .stdout(predicate::str::contains("add_extra_404_420"));
}

#[test]
fn pending_stages_skip_installed_versions() {
    let env = TestEnv::new();
    env.write_options(json!({"database": "4.1"}));
    env.cmd()
        .args(["stages", "--pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add_extra_logging_420"))
        .stdout(predicate::str::contains("handle_double_slash_410").not());
}

#[test]
fn pending_stages_stop_at_configured_target() {
    let env = TestEnv::with_config("[database]\ntarget_version = \"2.4\"\n");
    env.write_options(json!({"database": "2.3.3"}));
    env.cmd()
        .args(["stages", "--pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("convert_int_ip_to_varchar_240"))
        .stdout(predicate::str::contains("add_match_url_index").not());
}

#[test]
fn target_beyond_catalog_is_rejected() {
    let env = TestEnv::with_config("[database]\ntarget_version = \"5.0\"\n");
    env.write_options(json!({"database": "1.0"}));
    env.cmd()
        .args(["upgrade", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("newer than the latest known version"));
    assert_eq!(env.read_options()["database"], "1.0");
}

#[test]
fn config_show_prints_effective_config() {
    let env = TestEnv::with_config("[database]\ntable_prefix = \"blog_\"\n");
    env.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("table_prefix = \"blog_\""));
}

#[test]
fn config_init_writes_defaults_once() {
    let env = TestEnv::new();
    let fresh = env.dir.path().join("nested").join("config.toml");

    Command::new(env!("CARGO_BIN_EXE_dbup"))
        .args(["--config"])
        .arg(&fresh)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(fresh.exists());

    Command::new(env!("CARGO_BIN_EXE_dbup"))
        .args(["--config"])
        .arg(&fresh)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn invalid_config_fails_cleanly() {
    let env = TestEnv::with_config("[database]\ntable_prefix = \"wp-\"\n");
    env.cmd()
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn corrupt_options_file_fails() {
    let env = TestEnv::new();
    std::fs::write(&env.options, "not json").unwrap();
    env.cmd()
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed options record"));
}

#[test]
fn verbose_logs_go_to_stderr() {
    let env = TestEnv::new();
    let output = env.cmd().args(["upgrade", "-v"]).output().unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("running stage"));
    // stdout stays parseable
    serde_json::from_slice::<serde_json::Value>(&output.stdout).unwrap();
}

#[test]
fn completions_generate_for_bash() {
    Command::new(env!("CARGO_BIN_EXE_dbup"))
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dbup"));
}
