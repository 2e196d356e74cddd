// Prints the container usage text and the installed commands to stderr.

use std::process::ExitCode;

use dns_tools::ToolExitCode;
use dns_tools::usage::{self, USAGE_COMMAND};

fn main() -> ExitCode {
    let commands = std::env::current_exe()
        .and_then(|exe| {
            let dir = exe.parent().map(|p| p.to_path_buf()).unwrap_or_default();
            usage::list_commands(&dir, USAGE_COMMAND)
        })
        .unwrap_or_else(|e| {
            eprintln!("Failed to list commands: {}", e);
            Vec::new()
        });

    eprint!("{}", usage::render(&commands));
    ToolExitCode::Success.into()
}
