//! Source invariants for the parley library.
//!
//! Scans production files under `src/` (test files and shared fakes are
//! skipped) and checks the rules the pipeline depends on: credentials never
//! reach the logs, user-facing side effects and session teardown stay at
//! their chokepoints, and nothing panics or silently drops an error.

use std::fs;
use std::path::Path;

/// Pattern budgets. A budget never grows; fix an existing hit first.
const BUDGETS: &[(&str, usize)] = &[
    (".unwrap()", 0),
    (".expect(", 0),
    ("panic!(", 0),
    ("unreachable!(", 0),
    ("todo!(", 0),
    ("unimplemented!(", 0),
    ("let _ =", 0),
    // `ClientConfig::from_env` maps an unset variable to `None`.
    (".ok()", 1),
    ("#[allow(dead_code)]", 0),
];

/// Identifiers that must never be a field or argument of a `tracing` event.
const SECRETS: &[&str] = &["token", "password", "bearer"];

/// Calls that may only appear in the listed files.
const CHOKEPOINTS: &[(&str, &[&str])] = &[
    ("eprintln!(", &["net/notify.rs"]),
    ("alert_with_message(", &["net/notify.rs"]),
    ("set_href(", &["net/notify.rs"]),
    ("tokens.clear()", &["net/classifier.rs", "api.rs", "session/auth.rs"]),
    ("set_header(AUTHORIZATION", &["net/authenticator.rs"]),
    ("web_sys::", &["session/token.rs", "net/notify.rs"]),
];

struct SourceFile {
    /// Path relative to `src/`, with `/` separators.
    rel: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let root = Path::new("src");
    let mut files = Vec::new();
    walk(root, root, &mut files);
    assert!(!files.is_empty(), "no sources found under src/");
    files
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            walk(root, &path, out);
            continue;
        }
        let rel = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace('\\', "/");
        let is_test = rel.ends_with("_test.rs") || rel == "test_helpers.rs";
        if !rel.ends_with(".rs") || is_test {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { rel, content });
        }
    }
}

/// Every `tracing::<macro>!( ... )` invocation in `content`, parens balanced.
fn tracing_calls(content: &str) -> Vec<&str> {
    let mut calls = Vec::new();
    let mut rest = content;
    while let Some(start) = rest.find("tracing::") {
        let call = &rest[start..];
        let Some(open) = call.find('(') else {
            break;
        };
        let mut depth = 0usize;
        let mut end = call.len();
        for (i, c) in call.char_indices().skip(open) {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        end = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }
        calls.push(&call[..end]);
        rest = &call[end..];
    }
    calls
}

/// Split a macro invocation into (code outside string literals, literal text).
fn split_literals(call: &str) -> (String, String) {
    let mut code = String::new();
    let mut literals = String::new();
    let mut in_string = false;
    let mut escaped = false;
    for c in call.chars() {
        if in_string {
            match (escaped, c) {
                (false, '\\') => escaped = true,
                (false, '"') => in_string = false,
                _ => {
                    escaped = false;
                    literals.push(c);
                }
            }
        } else if c == '"' {
            in_string = true;
            literals.push(' ');
        } else {
            code.push(c);
        }
    }
    (code, literals)
}

fn mentions_ident(code: &str, ident: &str) -> bool {
    code.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .any(|word| word.eq_ignore_ascii_case(ident))
}

fn leaked_secret(call: &str) -> Option<&'static str> {
    let (code, literals) = split_literals(call);
    SECRETS.iter().copied().find(|secret| {
        mentions_ident(&code, secret) || literals.contains(&format!("{{{secret}"))
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[test]
fn pattern_budgets_hold() {
    let files = source_files();
    let mut failures = Vec::new();
    for (pattern, max) in BUDGETS {
        let hits: Vec<String> = files
            .iter()
            .flat_map(|file| {
                file.content
                    .lines()
                    .enumerate()
                    .filter(|(_, line)| line.contains(pattern))
                    .map(|(n, _)| format!("{}:{}", file.rel, n + 1))
                    .collect::<Vec<_>>()
            })
            .collect();
        if hits.len() > *max {
            failures.push(format!("`{pattern}`: {} > {max}\n  {}", hits.len(), hits.join("\n  ")));
        }
    }
    assert!(failures.is_empty(), "budget exceeded:\n{}", failures.join("\n"));
}

#[test]
fn credentials_never_reach_logs() {
    let mut leaks = Vec::new();
    for file in source_files() {
        for call in tracing_calls(&file.content) {
            if let Some(secret) = leaked_secret(call) {
                leaks.push(format!("{}: `{secret}` in {call}", file.rel));
            }
        }
    }
    assert!(leaks.is_empty(), "credential logged:\n{}", leaks.join("\n"));
}

#[test]
fn side_effects_stay_at_their_chokepoints() {
    let files = source_files();
    let mut strays = Vec::new();
    for (call, allowed) in CHOKEPOINTS {
        for file in &files {
            if file.content.contains(call) && !allowed.contains(&file.rel.as_str()) {
                strays.push(format!("`{call}` in {} (allowed: {})", file.rel, allowed.join(", ")));
            }
        }
    }
    assert!(strays.is_empty(), "side effect outside its chokepoint:\n{}", strays.join("\n"));
}

#[test]
fn every_chokepoint_is_still_used() {
    let files = source_files();
    for (call, allowed) in CHOKEPOINTS {
        let used = files.iter().any(|file| file.content.contains(call));
        assert!(used, "`{call}` no longer appears in {}; drop the rule", allowed.join(", "));
    }
}

#[test]
fn secret_scan_catches_fields_and_captures() {
    assert_eq!(leaked_secret(r#"tracing::debug!(token = %t, "stored")"#), Some("token"));
    assert_eq!(leaked_secret(r#"tracing::info!("sent {bearer}")"#), Some("bearer"));
    assert_eq!(leaked_secret(r#"tracing::warn!(?password)"#), Some("password"));
    assert_eq!(leaked_secret(r#"tracing::warn!(key = %k, "token write failed")"#), None);
}

#[test]
fn tracing_call_extraction_balances_parens() {
    let src = "a(); tracing::warn!(x = %f(y), \"m\"); b(); tracing::info!(z);";
    assert_eq!(tracing_calls(src), vec!["tracing::warn!(x = %f(y), \"m\")", "tracing::info!(z)"]);
}
