//! End-to-end pipeline tests against in-memory sources

use task_burrito::{
    load, render, Diagnostics, ExportConfig, Exporter, MemoryLoader, Report, Source, TaskId,
    TaskStatus,
};

fn id(s: &str) -> TaskId {
    s.parse().unwrap()
}

fn run(text: &str, exporter: Exporter, options: &[&str]) -> Report {
    let config = ExportConfig::default().with_options(options).unwrap();
    render(&Source::from_stdin(text), &MemoryLoader::new(), exporter, &config)
}

fn priority_of(text: &str, task: &str) -> Option<u8> {
    let mut diags = Diagnostics::new();
    let doc = load(&Source::from_stdin(text), &MemoryLoader::new(), &mut diags)
        .unwrap_or_else(|| panic!("load failed: {:?}", diags));
    doc.tree.get(&id(task)).unwrap().priority().map(|p| p.value())
}

#[test]
fn plain_output_is_a_fixed_point() {
    let text = "\
intro text is dropped
---
task 2
status in-progress
deadline 2021-05-04
---
Second.
---
task 1.10
depends 2
---
---
label First
task 1
priority none
---
First notes
without trailing newline";

    let once = run(text, Exporter::Plain, &[]);
    assert!(once.is_success());
    let twice = run(&once.text, Exporter::Plain, &[]);
    assert!(twice.is_success());
    assert_eq!(once.text, twice.text);
    assert!(once.text.starts_with("---\ntask 1\nlabel First\npriority none\n---\n"));
}

#[test]
fn priority_inherits_through_unset_ancestors() {
    let text = "---\ntask 1\n---\n---\ntask 1.1\npriority 3\n---\n---\ntask 1.1.1\n---\n";
    assert_eq!(priority_of(text, "1.1.1"), Some(3));
}

#[test]
fn none_stops_inheritance_regardless_of_root() {
    let text = "---\ntask 1\npriority 1\n---\n---\ntask 1.1\npriority none\n---\n---\ntask 1.1.1\n---\n";
    assert_eq!(priority_of(text, "1.1"), None);
    assert_eq!(priority_of(text, "1.1.1"), None);
}

#[test]
fn children_render_in_numeric_order() {
    let text = "---\ntask 1\n---\n---\ntask 1.2\n---\n---\ntask 1.10\n---\n---\ntask 1.3\n---\n";
    let report = run(text, Exporter::Simple, &["summary=0"]);
    assert!(report.is_success());

    let order: Vec<_> = report
        .text
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix("- [ ] "))
        .map(|rest| rest.split(':').next().unwrap().to_string())
        .collect();
    assert_eq!(order, vec!["1", "1.2", "1.3", "1.10"]);
}

#[test]
fn undeclared_ancestors_are_synthesized() {
    let mut diags = Diagnostics::new();
    let doc = load(
        &Source::from_stdin("---\ntask 1.1.2\nlabel Leaf\n---\n"),
        &MemoryLoader::new(),
        &mut diags,
    )
    .unwrap();
    assert!(diags.is_empty());

    for ancestor in ["1", "1.1"] {
        let node = doc.tree.get(&id(ancestor)).unwrap();
        assert!(node.is_implicit());
        assert_eq!(node.status(), TaskStatus::Todo);
        assert_eq!(node.label(), None);
    }
    assert_eq!(doc.tree.roots(), &[id("1")]);
    assert_eq!(doc.tree.get(&id("1.1")).unwrap().children(), &[id("1.1.2")]);
}

#[test]
fn fold_looks_only_at_direct_children() {
    let text = "\
---\ntask 1\n---\n---\ntask 1.1\nstatus DONE\n---\n---\ntask 1.2\nstatus DONE\n---\n\
---\ntask 2\n---\n---\ntask 2.1\nstatus DONE\n---\n---\ntask 2.2\nstatus IN-PROGRESS\n---\n\
---\ntask 2.2.1\nstatus DONE\n---\n";
    let report = run(text, Exporter::Simple, &["fold=1", "summary=0"]);
    assert!(report.is_success());

    assert!(report.text.contains("- [ ] 1: TODO (+2 folded)\n"));
    assert!(report.text.contains("- [ ] 2: TODO\n"));
    assert!(report.text.contains("  - [x] 2.1: DONE\n"));
}

#[test]
fn calendar_lists_only_unfinished_deadlines() {
    let text = "---\ntask 1\ndeadline 2020-02-01\n---\n---\ntask 2\nstatus DONE\ndeadline 2020-01-15\n---\n";
    let report = run(text, Exporter::Calendar, &["summary=0"]);
    assert!(report.is_success());

    assert!(report.text.contains("## February 2020"));
    assert!(report.text.contains("### 2020-02-01 Saturday"));
    assert!(!report.text.contains("2020-01-15"));
    assert!(!report.text.contains("January"));
}

#[test]
fn duplicate_identifier_fails_the_run() {
    let report = run("---\ntask 1.1\n---\n---\ntask 1.1\n---\n", Exporter::Simple, &[]);
    assert!(!report.is_success());
    assert!(report.text.is_empty());

    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), "invalid-identifier");
    assert!(errors[0].to_string().contains("1.1"));
}

#[test]
fn missing_dependency_fails_the_run() {
    let report = run("---\ntask 1\ndepends 9.9\n---\n", Exporter::Calendar, &[]);
    assert!(!report.is_success());

    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), "missing-reference");
    assert!(errors[0].to_string().contains("9.9"));
}

#[test]
fn dependency_cycles_only_warn() {
    let text = "---\ntask 1\ndepends 2\n---\n---\ntask 2\ndepends 1\n---\n";
    let report = run(text, Exporter::Simple, &[]);
    assert!(report.is_success());

    let warnings: Vec<_> = report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind(), "dependency-cycle");
}

#[test]
fn includes_expand_in_place_from_loader() {
    let loader = MemoryLoader::new()
        .with("/proj/parts/a.md", "---\ntask 2\n---\n---\ninclude parts/b.md\n---\n")
        .with("/proj/parts/b.md", "---\ntask 3\ndepends 1\n---\n");
    let source = Source::from_file(
        "/proj/tasks.md",
        "---\ntask 1\n---\n---\ninclude parts/a.md\n---\n",
    );

    let report = render(&source, &loader, Exporter::Plain, &ExportConfig::default());
    assert!(report.is_success(), "{:?}", report.diagnostics);
    assert_eq!(
        report.text,
        "---\ntask 1\n---\n---\ntask 2\n---\n---\ntask 3\ndepends 1\n---\n"
    );
}

#[test]
fn identifiers_are_unique_across_included_files() {
    let loader = MemoryLoader::new().with("/proj/a.md", "---\ntask 1.1\nlabel Again\n---\n");
    let source = Source::from_file(
        "/proj/tasks.md",
        "---\ntask 1.1\n---\n---\ninclude a.md\n---\n",
    );

    let report = render(&source, &loader, Exporter::Simple, &ExportConfig::default());
    assert!(!report.is_success());

    let errors: Vec<_> = report.errors().map(|d| d.to_string()).collect();
    assert_eq!(
        errors,
        vec![
            "/proj/a.md:1: error[invalid-identifier]: Duplicate task identifier 1.1 \
             (first declared at /proj/tasks.md:1)"
        ]
    );
}

#[test]
fn bad_values_do_not_hide_duplicates() {
    let report = run(
        "---\ntask 1\nstatus nope\n---\n---\ntask 2\n---\n---\ntask 2\n---\n",
        Exporter::Simple,
        &[],
    );
    let kinds: Vec<_> = report.errors().map(|d| d.kind()).collect();
    assert_eq!(kinds, vec!["invalid-value", "invalid-identifier"]);
}

#[test]
fn include_cycle_is_reported_with_path() {
    let loader = MemoryLoader::new().with("/proj/a.md", "---\ninclude b.md\n---\n")
        .with("/proj/b.md", "---\ninclude a.md\n---\n");
    let source = Source::from_file("/proj/tasks.md", "---\ntask 1\n---\n---\ninclude a.md\n---\n");

    let report = render(&source, &loader, Exporter::Simple, &ExportConfig::default());
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), "cyclic-include");
    assert!(errors[0].to_string().contains("a.md"));
}

#[test]
fn stdin_includes_resolve_against_override_directory() {
    let loader = MemoryLoader::new().with("/elsewhere/more.md", "---\ntask 5\n---\n");
    let source = Source::from_stdin("---\ninclude more.md\n---\n").with_base_dir("/elsewhere");

    let report = render(&source, &loader, Exporter::Plain, &ExportConfig::default());
    assert!(report.is_success(), "{:?}", report.diagnostics);
    assert_eq!(report.text, "---\ntask 5\n---\n");
}
