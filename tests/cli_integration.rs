//! CLI integration tests for todo
//!
//! These tests drive the `todo` binary against a temporary todo.txt file
//! and check both the printed output and the file left on disk.

use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temp directory holding a todo file and an (unused) config path
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn with_tasks(lines: &str) -> Self {
        let ws = Self::new();
        fs::write(ws.todo_file(), lines).unwrap();
        ws
    }

    fn todo_file(&self) -> PathBuf {
        self.dir.path().join("todo.txt")
    }

    fn config_file(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn contents(&self) -> String {
        fs::read_to_string(self.todo_file()).unwrap()
    }

    /// Get a command instance for the todo binary, isolated from the user's environment
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("todo"));
        cmd.current_dir(self.dir.path())
            .env("TODO_FILE", self.todo_file())
            .env("TODOTXT_CONFIG", self.config_file())
            .env_remove("RUST_LOG");
        cmd
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }
}

// =============================================================================
// Adding Tasks
// =============================================================================

#[test]
fn test_add_creates_file() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["add", "2013-01-20", "Call", "mum", "@phone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1: 2013-01-20 Call mum @phone"))
        .stdout(predicate::str::contains("TODO: 1 added."));

    assert_eq!(ws.contents(), "2013-01-20 Call mum @phone\n");
}

#[test]
fn test_add_appends_after_existing_lines() {
    let ws = Workspace::with_tasks("2013-01-01 First\n2013-01-02 Second\n");

    ws.cmd()
        .args(["add", "(A) 2013-01-03 Third"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TODO: 3 added."));

    assert_eq!(
        ws.contents(),
        "2013-01-01 First\n2013-01-02 Second\n(A) 2013-01-03 Third\n"
    );
}

#[test]
fn test_add_empty_text_fails() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task text is empty"));

    assert!(!ws.todo_file().exists());
}

// =============================================================================
// Listing
// =============================================================================

#[test]
fn test_list_sorts_priorities_first() {
    let ws = Workspace::with_tasks("2013-01-01 Water plants\n(B) 2013-01-01 Pay bills\n(A) 2013-01-01 Call bank\n");

    let output = ws.cmd().arg("list").assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<_> = stdout.lines().collect();

    assert_eq!(lines[0], "3: (A) 2013-01-01 Call bank");
    assert_eq!(lines[1], "2: (B) 2013-01-01 Pay bills");
    assert_eq!(lines[2], "1: 2013-01-01 Water plants");
    assert!(stdout.contains("TODO: 3 of 3 tasks shown"));
}

#[test]
fn test_list_filters_terms() {
    let ws = Workspace::with_tasks(
        "2013-01-01 Write python bindings\n2013-01-01 Port tests to java\n2013-01-01 Run suite @tests\n",
    );

    ws.cmd()
        .args(["list", "PYTHON"])
        .assert()
        .success()
        .stdout(predicate::str::contains("python bindings"))
        .stdout(predicate::str::contains("java").not());

    ws.cmd()
        .args(["list", "python|@tests"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TODO: 2 of 3 tasks shown"));

    ws.cmd()
        .args(["list", "~java"])
        .assert()
        .success()
        .stdout(predicate::str::contains("java").not())
        .stdout(predicate::str::contains("TODO: 2 of 3 tasks shown"));

    ws.cmd()
        .args(["list", "--", "-java"])
        .assert()
        .success()
        .stdout(predicate::str::contains("java").not())
        .stdout(predicate::str::contains("TODO: 2 of 3 tasks shown"));
}

#[test]
fn test_list_flags_after_terms() {
    let ws = Workspace::with_tasks(
        "(A) 2013-01-01 Learn python alpha
(B) 2013-01-01 Learn python bravo
x 2013-01-02 (A) 2013-01-01 Python done
",
    );

    ws.cmd()
        .args(["list", "python", "-p", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("python alpha"))
        .stdout(predicate::str::contains("bravo").not())
        .stdout(predicate::str::contains("TODO: 1 of 3 tasks shown"));

    ws.cmd()
        .args(["list", "Python", "-s"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TODO: 0 of 3 tasks shown"));

    ws.cmd()
        .args(["list", "python", "-a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Python done"))
        .stdout(predicate::str::contains("TODO: 3 of 3 tasks shown"));
}

#[test]
fn test_list_case_sensitive() {
    let ws = Workspace::with_tasks("2013-01-01 Write Python bindings\n");

    ws.cmd()
        .args(["list", "--case-sensitive", "python"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TODO: 0 of 1 tasks shown"));
}

#[test]
fn test_list_priority_filter() {
    let ws = Workspace::with_tasks(
        "(A) 2013-01-01 Alpha\n(B) 2013-01-01 Bravo\n(D) 2013-01-01 Delta\n2013-01-01 None\n",
    );

    ws.cmd()
        .args(["list", "--priority", "C-A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha"))
        .stdout(predicate::str::contains("Bravo"))
        .stdout(predicate::str::contains("Delta").not())
        .stdout(predicate::str::contains("None").not());

    ws.cmd()
        .args(["list", "-p", "a,d"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TODO: 2 of 4 tasks shown"));
}

#[test]
fn test_list_invalid_priority_filter_fails() {
    let ws = Workspace::with_tasks("(A) 2013-01-01 Alpha\n");

    ws.cmd()
        .args(["list", "--priority", "AB"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid priority filter"));
}

#[test]
fn test_list_json() {
    let ws = Workspace::with_tasks("(A) 2013-01-01 Call mum +family @phone due:2013-01-05\n");

    let output = ws
        .cmd()
        .args(["--format", "json", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let task = &json[0];
    assert_eq!(task["id"], 1);
    assert_eq!(task["priority"], "A");
    assert_eq!(task["created_at"], "2013-01-01");
    assert_eq!(task["projects"][0], "family");
    assert_eq!(task["contexts"][0], "phone");
    assert_eq!(task["metadata"]["due"], "2013-01-05");
}

// =============================================================================
// Completing
// =============================================================================

#[test]
fn test_do_hides_task_from_list() {
    let ws = Workspace::with_tasks("2013-01-01 Pay rent\n2013-01-01 Buy milk\n");

    ws.cmd()
        .args(["do", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TODO: 1 marked as done."));

    assert!(ws.contents().starts_with("x "));

    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pay rent").not());

    ws.cmd()
        .arg("listall")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pay rent"));

    ws.cmd()
        .args(["list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pay rent"));
}

#[test]
fn test_do_multiple() {
    let ws = Workspace::with_tasks("2013-01-01 One\n2013-01-01 Two\n2013-01-01 Three\n");

    ws.cmd().args(["do", "1", "3"]).assert().success();

    let lines: Vec<_> = ws.contents().lines().map(String::from).collect();
    assert!(lines[0].starts_with("x "));
    assert_eq!(lines[1], "2013-01-01 Two");
    assert!(lines[2].starts_with("x "));
}

#[test]
fn test_do_unknown_id_fails() {
    let ws = Workspace::with_tasks("2013-01-01 One\n");

    ws.cmd()
        .args(["do", "1", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No task with id 7"));

    assert_eq!(ws.contents(), "2013-01-01 One\n");
}

// =============================================================================
// Editing
// =============================================================================

#[test]
fn test_append_and_prepend() {
    let ws = Workspace::with_tasks("2013-01-01 World\n");

    ws.cmd()
        .args(["prepend", "1", "Hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1: 2013-01-01 Hello World"));

    ws.cmd()
        .args(["append", "1", "again", "+greetings"])
        .assert()
        .success();

    assert_eq!(ws.contents(), "2013-01-01 Hello World again +greetings\n");

    ws.cmd()
        .arg("projects")
        .assert()
        .success()
        .stdout(predicate::str::contains("greetings"));
}

#[test]
fn test_replace() {
    let ws = Workspace::with_tasks("2013-01-01 Old text +old\n");

    ws.cmd()
        .args(["replace", "1", "(C) 2013-02-02 New text +new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1: (C) 2013-02-02 New text +new"));

    assert_eq!(ws.contents(), "(C) 2013-02-02 New text +new\n");
}

#[test]
fn test_replace_unknown_id_fails() {
    let ws = Workspace::with_tasks("2013-01-01 Only\n");

    ws.cmd()
        .args(["replace", "4", "Anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No task with id 4"));
}

#[test]
fn test_pri_and_depri() {
    let ws = Workspace::with_tasks("2013-01-01 Important\n");

    ws.cmd()
        .args(["pri", "1", "b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TODO: 1 prioritized (B)."));

    assert_eq!(ws.contents(), "(B) 2013-01-01 Important\n");

    ws.cmd()
        .args(["depri", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TODO: 1 deprioritized."));

    assert_eq!(ws.contents(), "2013-01-01 Important\n");
}

#[test]
fn test_pri_invalid_letter_fails() {
    let ws = Workspace::with_tasks("2013-01-01 Important\n");

    ws.cmd()
        .args(["pri", "1", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid priority"));
}

// =============================================================================
// Removing
// =============================================================================

#[test]
fn test_rm() {
    let ws = Workspace::with_tasks("2013-01-01 Keep\n2013-01-01 Drop +gone\n");

    ws.cmd()
        .args(["rm", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TODO: 2 deleted."));

    assert_eq!(ws.contents(), "2013-01-01 Keep\n");

    ws.cmd()
        .arg("projects")
        .assert()
        .success()
        .stdout(predicate::str::contains("gone").not());
}

#[test]
fn test_rm_unknown_id_fails() {
    let ws = Workspace::with_tasks("2013-01-01 Keep\n");

    ws.cmd()
        .args(["rm", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No task with id 0"));
}

#[test]
fn test_dedup() {
    let ws = Workspace::with_tasks("2013-01-01 Buy milk\n2013-01-01 buy MILK\n2013-01-01 Buy milk\n");

    ws.cmd()
        .arg("dedup")
        .assert()
        .success()
        .stdout(predicate::str::contains("TODO: 2 duplicate task(s) removed."));

    assert_eq!(ws.contents().lines().count(), 1);

    ws.cmd()
        .arg("dedup")
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicate tasks found"));
}

// =============================================================================
// Projects, Contexts and Report
// =============================================================================

#[test]
fn test_projects_and_contexts() {
    let ws = Workspace::with_tasks("2013-01-01 a +beta @home\n2013-01-01 b +alpha @work\n");

    ws.cmd()
        .arg("projects")
        .assert()
        .success()
        .stdout("alpha\nbeta\n");

    ws.cmd()
        .arg("lsc")
        .assert()
        .success()
        .stdout("home\nwork\n");
}

#[test]
fn test_report_json() {
    let ws = Workspace::with_tasks(
        "(A) 2013-01-01 Call bank\nx 2013-01-02 2013-01-01 Pay rent +home\n2013-01-01 Fix sink +home\n",
    );

    let output = ws
        .cmd()
        .args(["report", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["total"], 3);
    assert_eq!(json["open"], 2);
    assert_eq!(json["completed"], 1);
    assert_eq!(json["by_priority"]["A"], 1);
    assert_eq!(json["by_project"]["home"], 1);
}

#[test]
fn test_report_text() {
    let ws = Workspace::with_tasks("(A) 2013-01-01 Call bank @phone\n");

    ws.cmd()
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total"))
        .stdout(predicate::str::contains("Contexts:"))
        .stdout(predicate::str::contains("phone"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_supplies_file_and_format() {
    let ws = Workspace::new();
    fs::write(
        ws.config_file(),
        "todo_file = \"lists/mine.txt\"\ndefault_format = \"json\"\n",
    )
    .unwrap();

    ws.cmd()
        .env_remove("TODO_FILE")
        .args(["add", "2013-01-01 From config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"text\":\"From config\""));

    let written = fs::read_to_string(ws.path().join("lists/mine.txt")).unwrap();
    assert_eq!(written, "2013-01-01 From config\n");
}

#[test]
fn test_file_flag_overrides_environment() {
    let ws = Workspace::new();
    let other = ws.path().join("other.txt");

    ws.cmd()
        .arg("--file")
        .arg(&other)
        .args(["add", "Elsewhere"])
        .assert()
        .success();

    assert!(other.exists());
    assert!(!ws.todo_file().exists());
}

#[test]
fn test_invalid_config_fails() {
    let ws = Workspace::new();
    fs::write(ws.config_file(), "default_format = \"yaml\"\n").unwrap();

    ws.cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}
