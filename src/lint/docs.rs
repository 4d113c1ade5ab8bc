//! Documentation references for rule categories.

use super::rule::RuleId;

/// Reference returned for a category without documentation.
pub const TODO_REFERENCE: &str = "TODO";

const REFERENCES: &[(&str, &str)] = &[
    ("CMD", "https://docs.docker.com/engine/reference/builder/#cmd"),
    ("CPY", "https://docs.docker.com/engine/reference/builder/#copy"),
    ("ENT", "https://docs.docker.com/engine/reference/builder/#entrypoint"),
    ("ENV", "https://docs.docker.com/engine/reference/builder/#env"),
    ("EXP", "https://docs.docker.com/engine/reference/builder/#expose"),
    ("FRM", "https://docs.docker.com/engine/reference/builder/#from"),
    ("MTR", "https://docs.docker.com/engine/reference/builder/#maintainer-deprecated"),
    ("RUN", "https://docs.docker.com/engine/reference/builder/#run"),
    ("STL", "https://docs.docker.com/engine/reference/builder/#from"),
    ("STS", "https://docs.docker.com/engine/reference/builder/#from"),
    ("USR", "https://docs.docker.com/engine/reference/builder/#user"),
    ("WKD", "https://docs.docker.com/engine/reference/builder/#workdir"),
];

/// Documentation URL for the category of `id`, or [`TODO_REFERENCE`].
pub fn docs_reference(id: RuleId) -> &'static str {
    let category = id.category();
    REFERENCES
        .iter()
        .find(|(prefix, _)| *prefix == category)
        .map_or(TODO_REFERENCE, |(_, url)| *url)
}
