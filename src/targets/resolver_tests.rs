use std::path::{Path, PathBuf};

use crate::process::stub::StubRunner;

use super::*;

fn workspace() -> Workspace {
    Workspace::new(PathBuf::from("/ws"))
}

fn labels(targets: &[TargetId]) -> Vec<&str> {
    targets.iter().map(TargetId::as_str).collect()
}

#[test]
fn query_expression_matches_bazel_syntax() {
    assert_eq!(
        query_expression("src/lib.rs").as_deref(),
        Some(r#"kind(".* rule", rdeps(//..., "src/lib.rs", 1))"#)
    );
}

#[test]
fn query_expression_switches_quotes_around_double_quote() {
    assert_eq!(
        query_expression(r#"data/say "hi".txt"#).as_deref(),
        Some(r#"kind(".* rule", rdeps(//..., 'data/say "hi".txt', 1))"#)
    );
}

#[test]
fn query_expression_rejects_unquotable_paths() {
    assert!(query_expression(r"src\lib.rs").is_none());
    assert!(query_expression(r#"it's "odd".rs"#).is_none());
}

#[test]
fn resolve_skips_the_query_for_unquotable_paths() {
    let runner = StubRunner::new();
    let resolver = TargetResolver::new(&runner, "bazel");

    let targets = resolver.resolve(&workspace(), r#"it's "odd".rs"#).unwrap();
    assert!(targets.is_empty());
    assert!(runner.calls().is_empty());
}

#[test]
fn parse_target_lines_skips_blank_lines() {
    let targets = parse_target_lines("//pkg:a\n\n//pkg:b\r\n   \n");
    assert_eq!(labels(&targets), vec!["//pkg:a", "//pkg:b"]);
}

#[test]
fn parse_target_lines_of_empty_output_is_empty() {
    assert!(parse_target_lines("").is_empty());
}

#[test]
fn resolve_returns_targets_in_emitted_order() {
    let runner = StubRunner::new().respond(0, "//pkg:a\n//pkg:b\n");
    let resolver = TargetResolver::new(&runner, "bazel");

    let targets = resolver.resolve(&workspace(), "pkg/a.rs").unwrap();
    assert_eq!(labels(&targets), vec!["//pkg:a", "//pkg:b"]);
}

#[test]
fn resolve_ignores_nonzero_exit_status() {
    let runner = StubRunner::new()
        .respond(0, "//pkg:a\n//pkg:b\n")
        .respond_full(7, "//pkg:a\n//pkg:b\n", "ERROR: something went wrong");
    let resolver = TargetResolver::new(&runner, "bazel");

    let clean = resolver.resolve(&workspace(), "pkg/a.rs").unwrap();
    let failing = resolver.resolve(&workspace(), "pkg/a.rs").unwrap();
    assert_eq!(clean, failing);
}

#[test]
fn resolve_with_empty_output_is_empty_not_error() {
    let runner = StubRunner::new().respond(3, "");
    let resolver = TargetResolver::new(&runner, "bazel");

    let targets = resolver.resolve(&workspace(), "orphan.rs").unwrap();
    assert!(targets.is_empty());
}

#[test]
fn resolve_surfaces_spawn_failure_as_tool_invocation() {
    let runner = StubRunner::new().fail_to_spawn();
    let resolver = TargetResolver::new(&runner, "/opt/missing/bazel");

    let err = resolver.resolve(&workspace(), "src/lib.rs").unwrap_err();
    match err {
        BazelCheckError::ToolInvocation { program, .. } => {
            assert_eq!(program, "/opt/missing/bazel");
        }
        other => panic!("expected ToolInvocation, got {other:?}"),
    }
}

#[test]
fn resolve_runs_query_from_workspace_root() {
    let runner = StubRunner::new().respond(0, "//src:lib\n");
    let resolver = TargetResolver::new(&runner, "bazelisk");

    resolver.resolve(&workspace(), "src/lib.rs").unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.program, "bazelisk");
    assert_eq!(call.current_dir(), Path::new("/ws"));
    assert_eq!(
        call.args,
        vec![
            "query",
            "--ui_event_filters=-info,-debug,-warning,-error,-stderr",
            "--noshow_progress",
            r#"kind(".* rule", rdeps(//..., "src/lib.rs", 1))"#,
        ]
    );
}

#[test]
fn every_resolve_runs_a_fresh_query() {
    let runner = StubRunner::new().respond(0, "//a:old\n").respond(0, "//a:new\n");
    let resolver = TargetResolver::new(&runner, "bazel");

    let first = resolver.resolve(&workspace(), "a/x.rs").unwrap();
    let second = resolver.resolve(&workspace(), "a/x.rs").unwrap();

    assert_eq!(labels(&first), vec!["//a:old"]);
    assert_eq!(labels(&second), vec!["//a:new"]);
    assert_eq!(runner.calls().len(), 2);
}
