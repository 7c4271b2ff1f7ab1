//! Test harness for folder-notes integration tests

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

pub use folder_notes::test_utils::TempVault;

/// Run the binary against `vault` and collect (stdout, stderr, success).
pub fn run_cli(vault: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = env!("CARGO_BIN_EXE_folder-notes");
    let output = Command::new(binary)
        .arg("--vault")
        .arg(vault)
        .arg("--color")
        .arg("never")
        .args(args)
        .output()
        .expect("Failed to run folder-notes");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

/// Path of the default settings file inside `vault`.
pub fn settings_file(vault: &Path) -> std::path::PathBuf {
    folder_notes::Settings::default_path(vault)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_temp_dir() {
        let vault = TempVault::new();
        assert!(vault.path().exists());
    }

    #[test]
    fn test_harness_add_file() {
        let vault = TempVault::new();
        let file_path = vault.add_file("Projects/plan.md", "# Plan");
        assert!(file_path.exists());
        assert_eq!(vault.read("Projects/plan.md"), "# Plan");
    }
}
