use std::process::Command;

/// Run a git command and return its trimmed stdout on success.
fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    // Release tags report the crate version; anything else reports the commit.
    let pkg = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let version = match (git(&["describe", "--exact-match", "--tags", "HEAD"]), git(&["rev-parse", "--short", "HEAD"])) {
        (Some(_), _) => pkg,
        (None, Some(hash)) if !hash.is_empty() => format!("dev@{hash}"),
        _ => "dev@unknown".to_string(),
    };

    println!("cargo:rustc-env=FOLDER_INDEX_VERSION={version}");
}
