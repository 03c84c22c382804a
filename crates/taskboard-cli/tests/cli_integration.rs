use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

struct Board {
    dir: TempDir,
}

impl Board {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    fn file(&self) -> std::path::PathBuf {
        self.dir.path().join("store.json")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskboard").unwrap();
        // Keep the user's own config out of the tests
        cmd.env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path())
            .env("XDG_DATA_HOME", self.dir.path())
            .env_remove("TASKBOARD_FILE")
            .env_remove("TASKBOARD_DEBUG_LOG")
            .arg("--file")
            .arg(self.file());
        cmd
    }

    fn ok(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let json = parse_json_output(&String::from_utf8_lossy(&output));
        assert_eq!(json["success"], true);
        json["data"].clone()
    }

    fn fails(&self, args: &[&str]) -> String {
        let output = self
            .cmd()
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stderr
            .clone();
        let json = parse_json_output(&String::from_utf8_lossy(&output));
        assert_eq!(json["success"], false);
        json["error"].as_str().unwrap().to_string()
    }

    fn add(&self, text: &str) -> String {
        self.ok(&["task", "add", text])["id"].to_string()
    }
}

fn parse_json_output(output: &str) -> Value {
    serde_json::from_str(output.trim()).expect("Failed to parse JSON output")
}

mod task_tests {
    use super::*;

    #[test]
    fn test_task_add() {
        let board = Board::new();
        let task = board.ok(&["task", "add", "Buy milk"]);

        assert_eq!(task["text"], "Buy milk");
        assert_eq!(task["status"], "todo");
        assert_eq!(task["description"], "");
        assert_eq!(task["checklist"], Value::Array(vec![]));
        assert!(task["id"].is_i64());
    }

    #[test]
    fn test_blank_task_is_rejected_without_writing() {
        let board = Board::new();
        let error = board.fails(&["task", "add", "   "]);

        assert!(error.contains("Please enter a task!"));
        assert!(!board.file().exists());
    }

    #[test]
    fn test_buy_milk_lifecycle() {
        let board = Board::new();
        let id = board.add("Buy milk");

        assert_eq!(board.ok(&["task", "start", "--id", &id])["status"], "inprogress");
        assert_eq!(board.ok(&["task", "complete", "--id", &id])["status"], "done");
        assert_eq!(board.ok(&["task", "reopen", "--id", &id])["status"], "todo");

        let list = board.ok(&["task", "list"]);
        assert_eq!(list["count"], 1);
        assert_eq!(list["items"][0]["text"], "Buy milk");
    }

    #[test]
    fn test_buttons_only_from_their_column() {
        let board = Board::new();
        let id = board.add("A");

        let error = board.fails(&["task", "complete", "--id", &id]);
        assert!(error.contains("Cannot complete"));
        let error = board.fails(&["task", "back", "--id", &id]);
        assert!(error.contains("Cannot move back"));

        // Done also leads to To Do, but through Reopen, not the back button
        board.ok(&["task", "move", "--id", &id, "--status", "done"]);
        let error = board.fails(&["task", "back", "--id", &id]);
        assert!(error.contains("it is in Done"));
        assert_eq!(board.ok(&["task", "get", "--id", &id])["status"], "done");
        assert!(board.fails(&["task", "start", "--id", &id]).contains("Cannot start"));
    }

    #[test]
    fn test_move_accepts_any_column() {
        let board = Board::new();
        let id = board.add("A");

        let task = board.ok(&["task", "move", "--id", &id, "--status", "done"]);
        assert_eq!(task["status"], "done");

        let done = board.ok(&["task", "list", "--status", "done"]);
        assert_eq!(done["count"], 1);
        let todo = board.ok(&["task", "list", "--status", "todo"]);
        assert_eq!(todo["count"], 0);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let board = Board::new();
        let id = board.add("A");
        board
            .cmd()
            .args(["task", "move", "--id", &id, "--status", "blocked"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown status"));
    }

    #[test]
    fn test_get_and_delete() {
        let board = Board::new();
        let id = board.add("A");

        assert_eq!(board.ok(&["task", "get", "--id", &id])["text"], "A");
        assert_eq!(board.ok(&["task", "delete", "--id", &id])["deleted"].to_string(), id);
        assert!(board.fails(&["task", "get", "--id", &id]).contains("Not found"));
        assert!(board.fails(&["task", "delete", "--id", &id]).contains("Not found"));
        assert_eq!(board.ok(&["task", "list"])["count"], 0);
    }

    #[test]
    fn test_describe() {
        let board = Board::new();
        let id = board.add("A");
        let task = board.ok(&["task", "describe", "--id", &id, "--text", "More detail"]);
        assert_eq!(task["description"], "More detail");
    }

    #[test]
    fn test_ids_are_unique() {
        let board = Board::new();
        let first = board.add("A");
        let second = board.add("B");
        assert_ne!(first, second);
    }
}

mod nested_tests {
    use super::*;

    #[test]
    fn test_checklist_scenario() {
        let board = Board::new();
        let id = board.add("Pack");

        board.ok(&["checklist", "add", "--task", &id, "--text", "A"]);
        let task = board.ok(&["checklist", "add", "--task", &id, "--text", "B"]);
        let a = task["checklist"][0]["id"].to_string();
        let b = task["checklist"][1]["id"].to_string();

        board.ok(&["checklist", "toggle", "--task", &id, "--item", &a]);
        let view = board.ok(&["board"]);
        assert_eq!(view["columns"][0]["cards"][0]["indicators"][0], "☑ 1/2");

        board.ok(&["checklist", "delete", "--task", &id, "--item", &b]);
        let view = board.ok(&["board"]);
        assert_eq!(view["columns"][0]["cards"][0]["indicators"][0], "☑ 1/1");

        let error = board.fails(&["checklist", "toggle", "--task", &id, "--item", &b]);
        assert!(error.contains("Checklist item"));
    }

    #[test]
    fn test_blank_checklist_item_changes_nothing() {
        let board = Board::new();
        let id = board.add("A");
        let task = board.ok(&["checklist", "add", "--task", &id, "--text", " "]);
        assert_eq!(task["checklist"], Value::Array(vec![]));
    }

    #[test]
    fn test_identical_comments_stay_distinct() {
        let board = Board::new();
        let id = board.add("A");

        board.ok(&["comment", "add", "--task", &id, "--text", "Same"]);
        let task = board.ok(&["comment", "add", "--task", &id, "--text", "Same"]);
        let comments = task["comments"].as_array().unwrap();

        assert_eq!(comments.len(), 2);
        assert_ne!(comments[0]["id"], comments[1]["id"]);
        assert!(!comments[0]["date"].as_str().unwrap().is_empty());

        let comment = comments[0]["id"].to_string();
        let task = board.ok(&["comment", "delete", "--task", &id, "--comment", &comment]);
        assert_eq!(task["comments"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_image_upload_skips_unreadable_files() {
        let board = Board::new();
        let id = board.add("Gallery");
        let image = board.dir.path().join("pixel.gif");
        fs::write(&image, b"GIF89a").unwrap();
        let missing = board.dir.path().join("missing.png");

        let data = board.ok(&[
            "image",
            "add",
            "--task",
            &id,
            image.to_str().unwrap(),
            missing.to_str().unwrap(),
        ]);
        assert_eq!(data["attached"], 1);
        assert_eq!(data["skipped"].as_array().unwrap().len(), 1);

        let images = data["task"]["images"].as_array().unwrap();
        assert_eq!(images[0]["name"], "pixel.gif");
        assert_eq!(images[0]["data"], "data:image/gif;base64,R0lGODlh");

        let image_id = images[0]["id"].to_string();
        let task = board.ok(&["image", "delete", "--task", &id, "--image", &image_id]);
        assert_eq!(task["images"], Value::Array(vec![]));
    }

    #[test]
    fn test_nested_ops_on_unknown_task() {
        let board = Board::new();
        let error = board.fails(&["comment", "add", "--task", "42", "--text", "x"]);
        assert!(error.contains("Not found: Task 42"));
    }
}

mod board_tests {
    use super::*;

    #[test]
    fn test_empty_board_placeholders() {
        let board = Board::new();
        let view = board.ok(&["board"]);

        assert_eq!(view["total"], 0);
        assert_eq!(view["columns"][0]["empty_message"], "No tasks in To Do");
        assert_eq!(view["columns"][1]["empty_message"], "No tasks in progress");
        assert_eq!(view["columns"][2]["empty_message"], "No completed tasks");
    }

    #[test]
    fn test_board_counts_and_actions() {
        let board = Board::new();
        let a = board.add("A");
        board.add("B");
        board.ok(&["task", "start", "--id", &a]);

        let view = board.ok(&["board"]);
        assert_eq!(view["counts"]["todo"], 1);
        assert_eq!(view["counts"]["inprogress"], 1);
        assert_eq!(view["counts"]["done"], 0);
        assert_eq!(
            view["columns"][1]["cards"][0]["actions"],
            serde_json::json!(["Edit", "To Do", "Done", "Delete"])
        );
        assert_eq!(view["columns"][1]["empty_message"], Value::Null);
    }

    #[test]
    fn test_reads_string_encoded_store() {
        let board = Board::new();
        let tasks = r#"[{"id":1700000000000,"text":"Legacy","status":"inprogress"}]"#;
        let store = serde_json::json!({ "tasks": tasks });
        fs::write(board.file(), store.to_string()).unwrap();

        let view = board.ok(&["board"]);
        assert_eq!(view["counts"]["inprogress"], 1);
        assert_eq!(view["columns"][1]["cards"][0]["text"], "Legacy");

        // New ids never collide with stored ones
        let id: i64 = board.add("New").parse().unwrap();
        assert!(id > 1700000000000);
    }

    #[test]
    fn test_store_holds_tasks_under_one_key() {
        let board = Board::new();
        board.add("A");

        let raw = fs::read_to_string(board.file()).unwrap();
        let store: Value = serde_json::from_str(&raw).unwrap();
        let tasks: Value = serde_json::from_str(store["tasks"].as_str().unwrap()).unwrap();
        assert_eq!(tasks[0]["text"], "A");
    }

    #[test]
    fn test_file_from_env() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("env.json");

        Command::cargo_bin("taskboard")
            .unwrap()
            .env("HOME", dir.path())
            .env("XDG_CONFIG_HOME", dir.path())
            .env("TASKBOARD_FILE", &file)
            .args(["task", "add", "From env"])
            .assert()
            .success();

        assert!(Path::new(&file).exists());
    }
}

#[test]
fn test_completions() {
    Command::cargo_bin("taskboard")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("taskboard"));
}
