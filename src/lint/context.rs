//! Context handed to every rule invocation.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

use crate::ast::{ArgCommand, ExposeCommand, SourceRange};
use crate::location::{LocationRange, LocationResolver};

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("VARIABLE regex must compile")
});

static NO_ARGS: LazyLock<BuildArgs> = LazyLock::new(BuildArgs::default);

static NO_TEXT: LocationResolver = LocationResolver::new();

/// Build arguments declared so far in the current stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildArgs {
    values: IndexMap<String, String>,
}

impl BuildArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Record the defaults declared by an `ARG` instruction.
    ///
    /// Arguments without a default have no known value and are skipped.
    pub fn apply(&mut self, arg: &ArgCommand) {
        for pair in &arg.args {
            if let Some(value) = &pair.value {
                self.set(pair.key.clone(), value.clone());
            }
        }
    }

    /// Replace `$NAME` and `${NAME}` with known values. Unknown variables are
    /// left as written.
    pub fn substitute(&self, text: &str) -> String {
        if !text.contains('$') {
            return text.to_string();
        }
        VARIABLE
            .replace_all(text, |caps: &Captures<'_>| {
                let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
                match self.get(name) {
                    Some(value) => value.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// A copy of `expose` with every port substituted.
    pub fn resolve_expose(&self, expose: &ExposeCommand) -> ExposeCommand {
        ExposeCommand {
            ports: expose.ports.iter().map(|port| self.substitute(port)).collect(),
            ..expose.clone()
        }
    }
}

/// Everything a rule may consult besides its node.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    resolver: &'a LocationResolver,
    build_args: &'a BuildArgs,
    stage_aliases: &'a [String],
}

impl<'a> RuleContext<'a> {
    pub fn new(
        resolver: &'a LocationResolver,
        build_args: &'a BuildArgs,
        stage_aliases: &'a [String],
    ) -> Self {
        Self {
            resolver,
            build_args,
            stage_aliases,
        }
    }

    /// A context with only raw text: no build args, no earlier stages.
    pub fn standalone(resolver: &'a LocationResolver) -> Self {
        Self::new(resolver, &NO_ARGS, &[])
    }

    pub fn resolver(&self) -> &'a LocationResolver {
        self.resolver
    }

    pub fn build_args(&self) -> &'a BuildArgs {
        self.build_args
    }

    /// Aliases of the stages before the current one.
    pub fn stage_aliases(&self) -> &'a [String] {
        self.stage_aliases
    }

    pub fn is_earlier_stage(&self, name: &str) -> bool {
        self.stage_aliases.iter().any(|alias| alias == name)
    }

    /// The coarse range of a node.
    pub fn coarse(&self, window: &[SourceRange]) -> LocationRange {
        LocationRange::from_source_ranges(window)
    }

    /// Exact span of `needle` in `window`, or the coarse range.
    pub fn locate(&self, needle: &str, window: &[SourceRange]) -> LocationRange {
        self.resolver.string_location(needle, window)
    }

    /// Exact span of `needle` as a whole word, searched after `preceding`
    /// words, or the coarse range.
    pub fn locate_token_after<S: AsRef<str>>(
        &self,
        preceding: &[S],
        needle: &str,
        window: &[SourceRange],
    ) -> LocationRange {
        self.resolver
            .find_token_after(preceding, needle, window)
            .unwrap_or_else(|| LocationRange::from_source_ranges(window))
    }

    /// One span covering every needle found in `window`.
    pub fn locate_union<S: AsRef<str>>(&self, needles: &[S], window: &[SourceRange]) -> LocationRange {
        self.resolver.union_location(needles, window)
    }
}

impl RuleContext<'static> {
    /// A context without raw text, build args or earlier stages.
    pub fn detached() -> Self {
        Self::standalone(&NO_TEXT)
    }
}
