use super::helpers::{passing_bin_dir, runner_cmd};
use predicates::prelude::*;

#[test]
fn test_menu_lists_demos_and_exits() {
    let dir = passing_bin_dir();
    runner_cmd()
        .arg("--bin-dir")
        .arg(dir.path())
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interactive Demo Mode"))
        .stdout(predicate::str::contains("2. TestAquaVisual"))
        .stdout(predicate::str::contains("4. Run all demos"))
        .stdout(predicate::str::contains("Enter your choice (0-4): "))
        .stdout(predicate::str::contains("Goodbye!"))
        .stdout(predicate::str::contains("Running:").not());
}

#[test]
fn test_invalid_choices_reprompt() {
    let dir = passing_bin_dir();
    runner_cmd()
        .arg("--interactive")
        .arg("--bin-dir")
        .arg(dir.path())
        .write_stdin("5\nabc\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice. Please try again."))
        .stdout(predicate::str::contains("Invalid input. Please enter a number."))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_non_utf8_line_is_invalid_input() {
    let dir = passing_bin_dir();
    runner_cmd()
        .arg("--bin-dir")
        .arg(dir.path())
        .write_stdin(b"\xff\xfe\n1\n0\n".to_vec())
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid input. Please enter a number."))
        .stdout(predicate::str::contains("Running: SimpleExample"))
        .stdout(predicate::str::contains("Goodbye!"))
        .stdout(predicate::str::contains("Exiting...").not());
}

#[test]
fn test_single_demo_then_exit() {
    let dir = passing_bin_dir();
    runner_cmd()
        .arg("--bin-dir")
        .arg(dir.path())
        .write_stdin("1\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Running: SimpleExample"))
        .stdout(predicate::str::contains("SimpleExample ran"))
        .stdout(predicate::str::contains("Running: SceneDemo").not());
}

#[test]
fn test_run_all_from_menu_exits_after_batch() {
    let dir = passing_bin_dir();
    runner_cmd()
        .arg("--bin-dir")
        .arg(dir.path())
        .write_stdin("4\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("DEMO SUMMARY"))
        .stdout(predicate::str::contains("Successful: 3"))
        .stdout(predicate::str::contains("Goodbye!").not());
}

#[test]
fn test_closed_stdin_exits() {
    let dir = passing_bin_dir();
    runner_cmd()
        .arg("--bin-dir")
        .arg(dir.path())
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exiting..."));
}
