use std::path::{Path, PathBuf};
use std::process::Command;

const MAX_LINES: usize = 750;
const CHECKED_EXTENSIONS: &[&str] = &["rs", "md", "yaml", "toml"];
const SKIPPED_DIRS: &[&str] = &["target", ".git", "examples"];

/// Calls that touch process-global state: env vars and the app-home override.
const GLOBAL_STATE_CALLS: &[&str] = &["env::set_var", "env::remove_var", "set_home_for_test("];

struct Violation {
    path: PathBuf,
    line: usize,
    message: String,
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rustc-env=COLLAB_GIT_SHA={}", git_sha());

    let root = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => return,
    };
    let mut files = Vec::new();
    collect(&root, &mut files);

    let mut violations = Vec::new();
    for path in &files {
        println!("cargo:rerun-if-changed={}", path.display());
        let Ok(content) = std::fs::read_to_string(path) else {
            continue;
        };
        let rel = path.strip_prefix(&root).unwrap_or(path).to_path_buf();
        check_length(&rel, &content, &mut violations);
        if rel.extension().is_some_and(|e| e == "rs") && rel.as_path() != Path::new("build.rs") {
            check_dead_code_allows(&rel, &content, &mut violations);
            check_serial_tests(&rel, &content, &mut violations);
        }
    }

    if !violations.is_empty() {
        for v in &violations {
            eprintln!("{}:{}: {}", v.path.display(), v.line, v.message);
        }
        panic!("collab build policy: {} violation(s)", violations.len());
    }
}

fn git_sha() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|sha| sha.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn collect(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if path.is_dir() {
            if !SKIPPED_DIRS.contains(&name) {
                collect(&path, files);
            }
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| CHECKED_EXTENSIONS.contains(&e))
            && name != "Cargo.lock"
        {
            files.push(path);
        }
    }
}

fn check_length(path: &Path, content: &str, out: &mut Vec<Violation>) {
    let lines = content.lines().filter(|l| !l.trim().is_empty()).count();
    if lines > MAX_LINES {
        out.push(Violation {
            path: path.to_path_buf(),
            line: 1,
            message: format!("{} non-empty lines (max {}); split the module", lines, MAX_LINES),
        });
    }
}

fn check_dead_code_allows(path: &Path, content: &str, out: &mut Vec<Violation>) {
    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if (trimmed.starts_with("#[allow(") || trimmed.starts_with("#![allow("))
            && trimmed.contains("dead_code")
        {
            out.push(Violation {
                path: path.to_path_buf(),
                line: i + 1,
                message: "dead_code allow; delete the code or gate it with #[cfg(test)]"
                    .to_string(),
            });
        }
    }
}

/// Tests that touch global state must carry `#[serial]`, in any attribute
/// position above the `fn`.
fn check_serial_tests(path: &Path, content: &str, out: &mut Vec<Violation>) {
    let mut attrs: Vec<&str> = Vec::new();
    let mut body: Option<(usize, bool, i32)> = None;

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if let Some((start, serial, depth)) = body.as_mut() {
            *depth += line.matches('{').count() as i32 - line.matches('}').count() as i32;
            let touches = !trimmed.starts_with("//")
                && GLOBAL_STATE_CALLS.iter().any(|call| trimmed.contains(call));
            if touches && !*serial {
                out.push(Violation {
                    path: path.to_path_buf(),
                    line: *start,
                    message: "test touches env or the app home without #[serial]".to_string(),
                });
                body = None;
            } else if *depth <= 0 && line.contains('}') {
                body = None;
            }
            continue;
        }

        if trimmed.starts_with("#[") {
            attrs.push(trimmed);
        } else if trimmed.contains("fn ") && !attrs.is_empty() {
            let is_test = attrs
                .iter()
                .any(|a| *a == "#[test]" || a.starts_with("#[tokio::test"));
            if is_test {
                let serial = attrs
                    .iter()
                    .any(|a| *a == "#[serial]" || *a == "#[serial_test::serial]");
                let depth = line.matches('{').count() as i32 - line.matches('}').count() as i32;
                if depth > 0 || !line.contains('}') {
                    body = Some((i + 1, serial, depth));
                }
            }
            attrs.clear();
        } else if !trimmed.is_empty() {
            attrs.clear();
        }
    }
}
