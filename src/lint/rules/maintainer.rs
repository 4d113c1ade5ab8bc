//! `MAINTAINER` rules.

use crate::ast::MaintainerCommand;
use crate::lint::{Rule, RuleContext, RuleOutcome, Severity, Validator};

pub const MTR001: Rule = Rule::new(
    "MTR001",
    "MAINTAINER is deprecated. Use a LABEL instead.",
    "Replace `MAINTAINER name` with `LABEL org.opencontainers.image.authors=\"name\"`.",
    Severity::Deprecation,
    Validator::Maintainer(deprecated),
);

fn deprecated(maintainer: &MaintainerCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    RuleOutcome::violation(ctx.locate(&maintainer.original, &maintainer.location))
}
