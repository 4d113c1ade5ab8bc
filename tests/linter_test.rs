//! End-to-end tests of the linter over a realistic instruction tree.

use berth::ast::Stage;
use berth::lint::{Linter, RuleRegistry, Severity, ValidationResult};
use berth::location::{LocationRange, LocationResolver};
use serde_json::json;

const BUILD_FILE: &str = "FROM golang:1.22 AS build
WORKDIR /src
RUN apt-get update && apt-get install -y curl
COPY . .
FROM alpine
MAINTAINER dev@example.com
USER root
";

fn line(n: usize) -> serde_json::Value {
    json!([{"start": {"line": n, "character": 0}, "end": {"line": n, "character": 0}}])
}

fn stages() -> Vec<Stage> {
    let tree = json!([
        {
            "name": "build",
            "base_name": "golang:1.22",
            "location": line(1),
            "commands": [
                {"kind": "workdir", "path": "/src", "original": "WORKDIR /src", "location": line(2)},
                {
                    "kind": "run",
                    "cmd_line": ["apt-get update && apt-get install -y curl"],
                    "prepend_shell": true,
                    "original": "RUN apt-get update && apt-get install -y curl",
                    "location": line(3)
                },
                {
                    "kind": "copy",
                    "sources_and_dest": [".", "."],
                    "original": "COPY . .",
                    "location": line(4)
                }
            ]
        },
        {
            "base_name": "alpine",
            "location": line(5),
            "commands": [
                {
                    "kind": "maintainer",
                    "maintainer": "dev@example.com",
                    "original": "MAINTAINER dev@example.com",
                    "location": line(6)
                },
                {"kind": "user", "user": "root", "original": "USER root", "location": line(7)},
                {"kind": "healthcheck", "original": "HEALTHCHECK NONE"}
            ]
        }
    ]);
    serde_json::from_value(tree).unwrap()
}

fn violations(results: &[ValidationResult]) -> Vec<&ValidationResult> {
    results.iter().filter(|r| r.is_violated()).collect()
}

fn find<'a>(results: &'a [ValidationResult], id: &str) -> &'a ValidationResult {
    results
        .iter()
        .find(|r| r.rule_id() == id)
        .unwrap_or_else(|| panic!("no result for {}", id))
}

#[test]
fn reports_expected_violations() {
    let resolver = LocationResolver::from_text(BUILD_FILE);
    let results = Linter::new(RuleRegistry::builtin()).run(&stages(), &resolver);

    let mut ids: Vec<&str> = violations(&results)
        .iter()
        .map(|r| r.rule_id().as_str())
        .collect();
    ids.sort();

    assert_eq!(
        ids,
        vec!["MTR001", "RUN002", "RUN006", "RUN010", "STS001", "USR001"]
    );
}

#[test]
fn locations_are_narrowed_with_source_text() {
    let resolver = LocationResolver::from_text(BUILD_FILE);
    let results = Linter::new(RuleRegistry::builtin()).run(&stages(), &resolver);

    assert_eq!(find(&results, "STS001").location(), LocationRange::new(5, 5, 5, 11));
    assert_eq!(find(&results, "USR001").location(), LocationRange::new(7, 5, 7, 9));
    assert_eq!(find(&results, "RUN002").location(), LocationRange::new(3, 41, 3, 45));
    assert_eq!(find(&results, "RUN006").location(), LocationRange::new(3, 4, 3, 11));
    assert_eq!(find(&results, "RUN010").location(), LocationRange::new(3, 30, 3, 37));
}

#[test]
fn locations_stay_coarse_without_source_text() {
    let results = Linter::new(RuleRegistry::builtin()).run(&stages(), &LocationResolver::new());

    assert_eq!(find(&results, "STS001").location(), LocationRange::new(5, 0, 5, 0));
    assert_eq!(find(&results, "RUN010").location(), LocationRange::new(3, 0, 3, 0));
}

#[test]
fn every_rule_reports_for_its_nodes() {
    let results = Linter::new(RuleRegistry::builtin()).run(&stages(), &LocationResolver::new());

    // Stage rules run once per stage, stage-list rules once.
    let sts001 = results.iter().filter(|r| r.rule_id() == "STS001").count();
    let stl001 = results.iter().filter(|r| r.rule_id() == "STL001").count();
    assert_eq!(sts001, 2);
    assert_eq!(stl001, 1);
    assert_eq!(results[0].rule_id(), "STL001");
}

#[test]
fn severities_come_from_rules() {
    let results = Linter::new(RuleRegistry::builtin()).run(&stages(), &LocationResolver::new());

    assert_eq!(find(&results, "MTR001").severity(), Severity::Deprecation);
    assert_eq!(find(&results, "USR001").severity(), Severity::Warning);
}

#[test]
fn running_twice_gives_identical_results() {
    let stages = stages();
    let resolver = LocationResolver::from_text(BUILD_FILE);
    let linter = Linter::new(RuleRegistry::builtin());

    assert_eq!(linter.run(&stages, &resolver), linter.run(&stages, &resolver));
}
