use predicates::str::contains;

mod support;

use support::TestEnv;

#[test]
fn add_uses_the_configured_default_priority() {
    let env = TestEnv::new();
    env.prio().args(["add", "Buy milk"]).assert().success();

    let tasks = env.read_tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Buy milk");
    assert_eq!(tasks[0].priority.as_str(), "medium");
    assert!(!tasks[0].completed);
    assert!(!tasks[0].id.is_empty());
}

#[test]
fn add_honors_config_default_priority() {
    let env = TestEnv::new();
    env.write_config("default_priority = \"high\"");
    env.prio().args(["add", "Urgent thing"]).assert().success();

    let tasks = env.read_tasks();
    assert_eq!(tasks[0].priority.as_str(), "high");
}

#[test]
fn add_with_all_flags() {
    let env = TestEnv::new();
    env.prio()
        .args([
            "add",
            "Pay rent",
            "--priority",
            "high",
            "--due",
            "2026-09-01",
            "--tag",
            "money",
            "--description",
            "transfer before the 1st",
        ])
        .assert()
        .success()
        .stdout(contains("Pay rent"));

    let tasks = env.read_tasks();
    assert_eq!(tasks[0].priority.as_str(), "high");
    assert_eq!(tasks[0].tag, "money");
    assert_eq!(tasks[0].description, "transfer before the 1st");
    assert_eq!(tasks[0].due_date.format("%Y-%m-%d").to_string(), "2026-09-01");
}

#[test]
fn add_emits_json_envelope() {
    let env = TestEnv::new();
    let output = env
        .prio()
        .args(["add", "Buy milk", "--json"])
        .output()
        .expect("run prio add");
    assert!(output.status.success());

    let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(envelope["schema_version"], "prio.v1");
    assert_eq!(envelope["command"], "add");
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["data"]["title"], "Buy milk");
}

#[test]
fn add_rejects_blank_title() {
    let env = TestEnv::new();
    env.prio()
        .args(["add", "   "])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("title must not be empty"));
    assert!(env.read_tasks().is_empty());
}

#[test]
fn add_rejects_unknown_priority() {
    let env = TestEnv::new();
    env.prio()
        .args(["add", "Task", "--priority", "urgent"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown priority"));
}

#[test]
fn add_rejects_bad_due_date() {
    let env = TestEnv::new();
    env.prio()
        .args(["add", "Task", "--due", "tomorrow"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("invalid due date"));
}

#[test]
fn toggle_flips_completion_both_ways() {
    let env = TestEnv::new();
    let id = env.add_task("Buy milk", "low");

    env.prio().args(["toggle", &id]).assert().success();
    assert!(env.read_tasks()[0].completed);

    // `done` is an alias for toggle
    env.prio().args(["done", &id]).assert().success();
    assert!(!env.read_tasks()[0].completed);
}

#[test]
fn toggle_unknown_id_exits_2() {
    let env = TestEnv::new();
    env.prio()
        .args(["toggle", "ghost"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Task not found"));
}

#[test]
fn edit_merges_partial_update() {
    let env = TestEnv::new();
    let id = env.add_task("Buy milk", "low");

    env.prio()
        .args(["edit", &id, "--title", "Buy oat milk"])
        .assert()
        .success()
        .stdout(contains("Buy oat milk"));

    let tasks = env.read_tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    assert_eq!(tasks[0].title, "Buy oat milk");
    assert_eq!(tasks[0].priority.as_str(), "low");
}

#[test]
fn edit_can_move_between_buckets() {
    let env = TestEnv::new();
    let id = env.add_task("Refile me", "low");

    env.prio()
        .args(["edit", &id, "--priority", "high"])
        .assert()
        .success();
    assert_eq!(env.read_tasks()[0].priority.as_str(), "high");
}

#[test]
fn edit_without_fields_exits_2() {
    let env = TestEnv::new();
    let id = env.add_task("Buy milk", "low");

    env.prio()
        .args(["edit", &id])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("no fields to edit"));
}

#[test]
fn edit_unknown_id_exits_2() {
    let env = TestEnv::new();
    env.prio()
        .args(["edit", "ghost", "--title", "nope"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn rm_deletes_and_is_guarded_against_unknown_ids() {
    let env = TestEnv::new();
    let id = env.add_task("Ephemeral", "medium");

    env.prio().args(["rm", &id]).assert().success();
    assert!(env.read_tasks().is_empty());

    env.prio()
        .args(["rm", &id])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Task not found"));

    // --force swallows the missing id
    env.prio().args(["rm", &id, "--force"]).assert().success();
}

#[test]
fn list_groups_by_bucket() {
    let env = TestEnv::new();
    env.add_task("Low one", "low");
    env.add_task("High one", "high");
    env.add_task("Medium one", "medium");

    env.prio()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("3 task(s)"))
        .stdout(contains("high:"))
        .stdout(contains("medium:"))
        .stdout(contains("low:"))
        .stdout(contains("High one"));
}

#[test]
fn list_filters_by_priority_and_status() {
    let env = TestEnv::new();
    env.add_task("Low one", "low");
    let done = env.add_task("High done", "high");
    env.prio().args(["toggle", &done]).assert().success();

    let output = env
        .prio()
        .args(["list", "--priority", "high", "--json"])
        .output()
        .expect("run prio list");
    let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(envelope["data"]["total"], 1);
    assert_eq!(envelope["data"]["low"].as_array().unwrap().len(), 0);
    assert_eq!(envelope["data"]["high"][0]["title"], "High done");

    let output = env
        .prio()
        .args(["list", "--pending", "--json"])
        .output()
        .expect("run prio list");
    let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(envelope["data"]["total"], 1);
    assert_eq!(envelope["data"]["low"][0]["title"], "Low one");
}

#[test]
fn show_prints_one_task() {
    let env = TestEnv::new();
    let id = env.add_task("Inspect me", "medium");

    env.prio()
        .args(["show", &id])
        .assert()
        .success()
        .stdout(contains("Inspect me"))
        .stdout(contains("pending"));

    env.prio()
        .args(["show", "ghost"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn quiet_suppresses_human_output() {
    let env = TestEnv::new();
    let output = env
        .prio()
        .args(["add", "Silent", "--quiet"])
        .output()
        .expect("run prio add");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(env.read_tasks().len(), 1);
}

#[test]
fn corrupt_tasks_file_reads_as_empty() {
    let env = TestEnv::new();
    std::fs::create_dir_all(env.data_dir()).unwrap();
    std::fs::write(env.data_dir().join("tasks.json"), "{broken").unwrap();

    env.prio()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("0 task(s)"));
}

#[test]
fn error_envelope_in_json_mode() {
    let env = TestEnv::new();
    let output = env
        .prio()
        .args(["show", "ghost", "--json"])
        .output()
        .expect("run prio show");
    assert_eq!(output.status.code(), Some(2));

    let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(envelope["schema_version"], "prio.v1");
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["error"]["code"], 2);
    assert_eq!(envelope["error"]["kind"], "user_error");
}
