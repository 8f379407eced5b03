use chrono::Local;
use std::process::Command;

fn main() {
    let git_hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());

    // Tracked files modified since HEAD (untracked files don't count)
    let dirty = Command::new("git")
        .args(["diff", "--quiet", "HEAD"])
        .status()
        .map(|s| !s.success())
        .unwrap_or(false);

    let build_hash = if dirty {
        format!("{git_hash}-dirty-{}", Local::now().format("%Y%m%d-%H%M%S"))
    } else {
        git_hash
    };

    println!("cargo:rustc-env=BUILD_HASH={build_hash}");

    // .git lives at the workspace root, two levels up
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
