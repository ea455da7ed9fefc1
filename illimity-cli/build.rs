use std::path::PathBuf;
use std::process::Command;

/// Embed `git describe` output so `--version` identifies the exact build,
/// including whether the tree had local edits.
fn main() {
    let workspace = std::env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .and_then(|dir| dir.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(".."));

    let describe = Command::new("git")
        .arg("-C")
        .arg(&workspace)
        .args(["describe", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=ILLIMITY_BUILD_SHA={describe}");
    println!("cargo:rerun-if-changed={}", workspace.join(".git/HEAD").display());
}
