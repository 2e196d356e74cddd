//! Usage text for the container image
//!
//! The commands are discovered from the executables installed next to
//! `usage`, so new tools show up without touching this module.

use std::fmt::Write as _;
use std::io;
use std::path::Path;

/// Name of the usage executable itself
pub const USAGE_COMMAND: &str = "usage";

/// Prefixes of the tool executables; other binaries sharing the directory
/// (e.g. `/usr/local/bin`) are not commands
pub const COMMAND_PREFIXES: [&str; 1] = ["azure-"];

/// Command names found in `dir`, excluding `self_name`, sorted
///
/// Files without an extension whose name starts with one of
/// [`COMMAND_PREFIXES`] are commands; on Windows the `.exe` suffix is
/// stripped. Anything else (scripts, docs, debug symbols) is ignored.
pub fn list_commands(dir: &Path, self_name: &str) -> io::Result<Vec<String>> {
    let mut commands = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        let command = match path.extension().and_then(|e| e.to_str()) {
            None => path.file_name(),
            Some("exe") => path.file_stem(),
            Some(_) => continue,
        };
        let Some(command) = command.and_then(|c| c.to_str()) else {
            continue;
        };

        let is_tool = COMMAND_PREFIXES.iter().any(|p| command.starts_with(p));
        if is_tool && command != self_name {
            commands.push(command.to_string());
        }
    }

    commands.sort();
    Ok(commands)
}

/// Full usage text
pub fn render(commands: &[String]) -> String {
    let mut out = String::from(
        "Usage: docker run --rm -i -v <local volume>:<container volume> \
         devsecurity/dns-tools:<tag> <command> <command parameters>\n\n",
    );
    out.push_str("Tags:\n\tlatest\n\n");
    out.push_str("Commands:\n");
    for command in commands {
        let _ = writeln!(out, "\t{}", command);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_list_commands_skips_self_and_other_files() {
        let dir = TempDir::new().unwrap();
        for name in [
            "usage",
            "azure-zone-upload",
            "azure-zone-download",
            "README.md",
            "azure-zone-upload.d",
        ] {
            File::create(dir.path().join(name)).unwrap();
        }
        std::fs::create_dir(dir.path().join("lib")).unwrap();

        let commands = list_commands(dir.path(), USAGE_COMMAND).unwrap();
        assert_eq!(commands, vec!["azure-zone-download", "azure-zone-upload"]);
    }

    #[test]
    fn test_unrelated_binaries_are_not_commands() {
        let dir = TempDir::new().unwrap();
        for name in ["usage", "azure-zone-download", "ls", "python3", "zone-tool"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let commands = list_commands(dir.path(), USAGE_COMMAND).unwrap();
        assert_eq!(commands, vec!["azure-zone-download"]);
    }

    #[test]
    fn test_exe_suffix_is_stripped() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("usage.exe")).unwrap();
        File::create(dir.path().join("azure-zone-upload.exe")).unwrap();

        let commands = list_commands(dir.path(), USAGE_COMMAND).unwrap();
        assert_eq!(commands, vec!["azure-zone-upload"]);
    }

    #[test]
    fn test_render() {
        let text = render(&["azure-zone-download".into(), "azure-zone-upload".into()]);
        assert_eq!(
            text,
            "Usage: docker run --rm -i -v <local volume>:<container volume> \
             devsecurity/dns-tools:<tag> <command> <command parameters>\n\n\
             Tags:\n\tlatest\n\n\
             Commands:\n\tazure-zone-download\n\tazure-zone-upload\n"
        );
    }
}
