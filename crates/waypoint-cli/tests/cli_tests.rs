use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with plain output, an unreachable relay and no key variables
fn wp_cmd(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("wp").expect("Failed to find wp binary");
    cmd.env_remove("OPENAI_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("WAYPOINT_RELAY_URL")
        .arg("--no-color")
        .arg("--database-file")
        .arg(db_path)
        .arg("--relay-url")
        .arg("http://127.0.0.1:1/api");
    cmd
}

#[test]
fn test_cli_show_empty() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No journey yet."));
}

#[test]
fn test_cli_start_without_credentials_shows_fallback() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(&temp_dir)
        .args(["start", "Online", "bookstore"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Journey: Online bookstore"))
        .stdout(predicate::str::contains("Context: Online bookstore"))
        .stdout(predicate::str::contains(
            "1. Setup AI credentials for smart suggestions",
        ))
        .stdout(predicate::str::contains("wp credentials set"));
}

#[test]
fn test_cli_add_undo_redo() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(&temp_dir)
        .args(["start", "Coffee shop"])
        .assert()
        .success();

    wp_cmd(&temp_dir)
        .args(["add", "Order latte"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added step"));

    wp_cmd(&temp_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("  - Order latte"));

    // History does not survive a restart, so the reloaded journey has none
    wp_cmd(&temp_dir)
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to undo"));
}

#[test]
fn test_cli_pick_fallback_points_at_credentials() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(&temp_dir)
        .args(["start", "Banking app"])
        .assert()
        .success();

    wp_cmd(&temp_dir)
        .args(["pick", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated suggestions need an API key"));
}

#[test]
fn test_cli_pick_prints_regenerated_list_first() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(&temp_dir)
        .args(["start", "Banking app"])
        .assert()
        .success();

    wp_cmd(&temp_dir)
        .args(["pick", "2"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"(?s)2\. Configure OpenAI or Anthropic API.*Generated suggestions need an API key",
        )
        .unwrap());

    wp_cmd(&temp_dir)
        .args(["pick", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wp add"));
}

#[test]
fn test_cli_diagram_prints_mermaid() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(&temp_dir)
        .args(["start", "Online store"])
        .assert()
        .success();
    wp_cmd(&temp_dir)
        .args(["add", "End of checkout"])
        .assert()
        .success();

    wp_cmd(&temp_dir)
        .arg("diagram")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("flowchart TD"))
        .stdout(predicate::str::contains("node_1((\"End of checkout\"))"))
        .stdout(predicate::str::contains("node_0 -->|\"next\"| node_1"));

    wp_cmd(&temp_dir)
        .args(["diagram", "--palette", "crimson"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown palette"));
}

#[test]
fn test_cli_projects_list_templates() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(&temp_dir)
        .args(["projects", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Projects"))
        .stdout(predicate::str::contains("`ecommerce` (template)"))
        .stdout(predicate::str::contains("`website` (template)"));
}

#[test]
fn test_cli_open_template_without_credentials() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(&temp_dir)
        .args(["projects", "open", "mobile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Journey: Mobile application"));
}

#[test]
fn test_cli_credentials_are_masked() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(&temp_dir)
        .args(["credentials", "set", "--openai-key", "sk-secret-1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1234"))
        .stdout(predicate::str::contains("sk-secret").not());

    wp_cmd(&temp_dir)
        .args(["credentials", "clear"])
        .assert()
        .success();

    wp_cmd(&temp_dir)
        .args(["credentials", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No credentials stored"));
}

#[test]
fn test_cli_credentials_require_active_key() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(&temp_dir)
        .args(["credentials", "set", "--provider", "anthropic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Anthropic API key"));
}

#[test]
fn test_cli_share_and_import() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(&temp_dir)
        .args(["start", "Museum visit"])
        .assert()
        .success();
    wp_cmd(&temp_dir)
        .args(["add", "Buy ticket"])
        .assert()
        .success();

    let output = wp_cmd(&temp_dir)
        .args(["share", "--origin", "https://maps.example"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let url = String::from_utf8(output).expect("Invalid UTF-8");
    let url = url.trim();
    assert!(url.starts_with("https://maps.example?journey="));

    wp_cmd(&temp_dir).arg("clear").assert().success();

    wp_cmd(&temp_dir)
        .args(["import", url])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Journey: Museum visit"))
        .stdout(predicate::str::contains("Buy ticket"));
}

#[test]
fn test_cli_export_to_file_and_import() {
    let temp_dir = create_cli_test_environment();
    let export_path = temp_dir.path().join("journey.json");
    let export_arg = export_path.to_str().unwrap();

    wp_cmd(&temp_dir)
        .args(["start", "Car rental"])
        .assert()
        .success();
    wp_cmd(&temp_dir)
        .args(["export", "--output", export_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let json = std::fs::read_to_string(&export_path).unwrap();
    assert!(json.contains("\"context\": \"Car rental\""));

    wp_cmd(&temp_dir).arg("clear").assert().success();
    wp_cmd(&temp_dir)
        .args(["import", export_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Journey: Car rental"));
}

#[test]
fn test_cli_session_builds_journey() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(&temp_dir)
        .arg("session")
        .write_stdin("Gym membership\nSign up online\nundo\nredo\nzoom in\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Journey: Gym membership"))
        .stdout(predicate::str::contains("Added step"))
        .stdout(predicate::str::contains("Zoom: 120%"));

    wp_cmd(&temp_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("  - Sign up online"));
}
