//! Built-in lint rules.
//!
//! Rules are grouped by the node kind they are bound to. [`builtin_rules`]
//! lists them in registration order, which is also the order their results
//! appear in for a given node.

mod copy;
mod exec_form;
mod expose;
mod image;
mod maintainer;
mod packages;
mod run;
mod stage;
mod stage_list;
mod workdir;

pub use copy::{CPY001, CPY002, CPY003, CPY004, CPY005};
pub use exec_form::{CMD001, ENT001};
pub use expose::EXP001;
pub use maintainer::MTR001;
pub use packages::{RUN002, RUN005, RUN006, RUN009, RUN010};
pub use run::{RUN001, RUN003, RUN004, RUN007, RUN008};
pub use stage::{CPY006, STS001, STS002, STS003, STS004};
pub use stage_list::{STL001, USR001};
pub use workdir::WKD001;

use super::context::RuleContext;
use super::rule::Rule;
use crate::ast::{ExecCommand, SourceRange};
use crate::location::LocationRange;
use crate::shell::BashCommandChain;

/// Every built-in rule, in registration order.
pub fn builtin_rules() -> Vec<Rule> {
    vec![
        STL001, USR001, STS001, STS002, STS003, STS004, CPY006, CMD001, ENT001, CPY001, CPY002,
        CPY003, CPY004, CPY005, EXP001, MTR001, RUN001, RUN002, RUN003, RUN004, RUN005, RUN006,
        RUN007, RUN008, RUN009, RUN010, WKD001,
    ]
}

/// Parse the command line of a `RUN`, `CMD` or `ENTRYPOINT`.
fn shell_chain(command: &ExecCommand) -> BashCommandChain {
    if command.prepend_shell {
        BashCommandChain::parse(command.cmd_line.join(" ").as_str())
    } else {
        BashCommandChain::parse(&command.cmd_line)
    }
}

/// Exact span of `needle` inside command `idx` of `chain`.
///
/// The words of earlier commands are skipped first, so a binary or
/// sub-command repeated in the chain resolves to the right command.
fn locate_in_chain(
    ctx: &RuleContext<'_>,
    chain: &BashCommandChain,
    idx: usize,
    needle: &str,
    window: &[SourceRange],
) -> LocationRange {
    ctx.locate_token_after(&chain.words_before(idx), needle, window)
}
