use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn run(mut cmd: Command, stdin_json: &str) -> (i32, String, String) {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(stdin_json.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

/// Run the hook binary with `CLAUDE_PROJECT_DIR` pointing at `project_dir`,
/// feeding `stdin_json` on stdin. Returns (exit_code, stdout, stderr).
pub fn run_cli(project_dir: &Path, stdin_json: &str) -> (i32, String, String) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_feattrack"));
    cmd.env("CLAUDE_PROJECT_DIR", project_dir);
    run(cmd, stdin_json)
}

/// Run the hook binary from inside `dir` with `CLAUDE_PROJECT_DIR` unset,
/// exercising the fallback to the process working directory.
pub fn run_cli_from(dir: &Path, stdin_json: &str) -> (i32, String, String) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_feattrack"));
    cmd.env_remove("CLAUDE_PROJECT_DIR").current_dir(dir);
    run(cmd, stdin_json)
}

/// Create an empty temp project directory.
/// The `TempDir` must be kept alive for the duration of the test.
pub fn temp_project() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Write a file under `root`, creating parent directories as needed.
pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

pub fn common(cwd: &str) -> String {
    format!(
        r#"
    "session_id": "test-session",
    "transcript_path": "/tmp/t.jsonl",
    "cwd": "{cwd}",
    "permission_mode": "default"
"#
    )
}
