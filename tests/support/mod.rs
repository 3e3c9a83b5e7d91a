use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use prio::task::Task;
use tempfile::TempDir;

/// A throwaway data directory plus a command builder pointed at it.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn prio(&self) -> Command {
        let mut cmd = Command::cargo_bin("prio").expect("binary");
        cmd.env("PRIO_DATA_DIR", self.data_dir());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    pub fn read_tasks(&self) -> Vec<Task> {
        let path = self.data_dir().join("tasks.json");
        if !path.exists() {
            return Vec::new();
        }
        let contents = fs::read_to_string(&path).expect("read tasks.json");
        serde_json::from_str(&contents).expect("parse tasks.json")
    }

    pub fn read_theme(&self) -> Option<String> {
        fs::read_to_string(self.data_dir().join("theme"))
            .ok()
            .map(|raw| raw.trim().to_string())
    }

    pub fn write_config(&self, contents: &str) {
        fs::create_dir_all(self.data_dir()).expect("create data dir");
        fs::write(self.data_dir().join("config.toml"), contents).expect("write config.toml");
    }

    /// Add a task through the CLI and return its id.
    pub fn add_task(&self, title: &str, priority: &str) -> String {
        let output = self
            .prio()
            .args(["add", title, "--priority", priority, "--json"])
            .output()
            .expect("run prio add");
        assert!(output.status.success(), "prio add failed: {output:?}");
        let envelope: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("parse add output");
        envelope["data"]["id"]
            .as_str()
            .expect("task id in output")
            .to_string()
    }
}
