mod feature;
mod plan;
mod preferences;
mod project;
mod render;
mod types;

use project::Project;
use std::io::{self, Read};
use std::process;
use types::HookInput;

fn read_stdin() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn main() {
    // A hook must never take the session down: unreadable or unrecognized
    // input means "nothing to do", not an error.
    let Ok(raw) = read_stdin() else { return };
    let Ok(input) = serde_json::from_str::<HookInput>(&raw) else { return };

    match &input {
        HookInput::SessionStart(e) => {
            if let Some(output) = Project::locate().and_then(|p| p.handle_session_start(e)) {
                if let Ok(json) = serde_json::to_string(&output) {
                    println!("{json}");
                }
            }
        }
        HookInput::PreToolUse(e) => {
            if let Some(message) = Project::locate().and_then(|p| p.handle_pre_tool_use(e)) {
                // Exit status 2 tells the host to reject the tool call and
                // show stderr to the model.
                eprintln!("{message}");
                process::exit(2);
            }
        }
        HookInput::Other => {}
    }
}
