//! `EXPOSE` rules.

use crate::ast::ExposeCommand;
use crate::lint::{Rule, RuleContext, RuleOutcome, Severity, Validator};

const MAX_PORT: u32 = 65535;
const PROTOCOLS: &[&str] = &["tcp", "udp", "sctp"];

pub const EXP001: Rule = Rule::new(
    "EXP001",
    "Expose a valid UNIX port.",
    "Each EXPOSE entry is a port or a `start-end` range in 0-65535, optionally \
     followed by `/tcp`, `/udp` or `/sctp`.",
    Severity::Error,
    Validator::Expose(valid_ports),
);

fn valid_ports(expose: &ExposeCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    // Ports still holding a variable could not be resolved from build args.
    let invalid: Vec<&str> = expose
        .ports
        .iter()
        .map(String::as_str)
        .filter(|port| !port.contains('$'))
        .filter(|port| !is_valid_port_spec(port))
        .collect();

    let outcome = expose
        .ports
        .iter()
        .fold(RuleOutcome::pass(ctx.coarse(&expose.location)), |acc, port| {
            acc.latch(invalid.contains(&port.as_str()))
        });
    if !outcome.is_violated() {
        return outcome;
    }

    let message = match invalid.as_slice() {
        [one] => format!("Port \"{}\" is not a valid UNIX port.", one),
        many => format!("Ports \"{}\" are not valid UNIX ports.", many.join(", ")),
    };
    outcome
        .with_message(message)
        .with_location(ctx.locate_union(&invalid, &expose.location))
}

/// `port[/protocol]` or `start-end[/protocol]`.
fn is_valid_port_spec(spec: &str) -> bool {
    let (ports, protocol) = match spec.split_once('/') {
        Some((ports, protocol)) => (ports, Some(protocol)),
        None => (spec, None),
    };
    if protocol.is_some_and(|p| !PROTOCOLS.contains(&p)) {
        return false;
    }
    match ports.split_once('-') {
        Some((start, end)) => match (parse_port(start), parse_port(end)) {
            (Some(start), Some(end)) => start <= end,
            _ => false,
        },
        None => parse_port(ports).is_some(),
    }
}

fn parse_port(port: &str) -> Option<u32> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    port.parse::<u32>().ok().filter(|&p| p <= MAX_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SourceRange;
    use crate::lint::rules::testing::check_with_text;
    use crate::location::LocationRange;

    fn expose(ports: &[&str]) -> ExposeCommand {
        ExposeCommand {
            original: format!("EXPOSE {}", ports.join(" ")),
            location: vec![SourceRange::line(1)],
            ports: ports.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn flags_only_out_of_range_port() {
        let command = expose(&["4242", "67999"]);
        let outcome = check_with_text(valid_ports, &command, &command.original);

        assert!(outcome.is_violated());
        assert_eq!(outcome.message(), "Port \"67999\" is not a valid UNIX port.");
        assert_eq!(outcome.location(), LocationRange::new(1, 12, 1, 17));
    }

    #[test]
    fn later_valid_port_does_not_clear_violation() {
        let command = expose(&["70000", "80"]);

        assert!(valid_ports(&command, &RuleContext::detached()).is_violated());
    }

    #[test]
    fn valid_specs() {
        for spec in ["0", "80", "65535", "80/tcp", "53/udp", "9/sctp", "8000-8010", "7000-7001/udp"] {
            assert!(is_valid_port_spec(spec), "{}", spec);
        }
    }

    #[test]
    fn invalid_specs() {
        for spec in ["65536", "-1", "80/http", "80/", "abc", "", "9000-8000", "1-70000", "+80"] {
            assert!(!is_valid_port_spec(spec), "{}", spec);
        }
    }

    #[test]
    fn unresolved_variables_are_skipped() {
        let command = expose(&["$PORT", "${OTHER}/udp"]);

        assert!(!valid_ports(&command, &RuleContext::detached()).is_violated());
    }

    #[test]
    fn several_invalid_ports_are_listed() {
        let command = expose(&["99999", "80", "http"]);
        let outcome = check_with_text(valid_ports, &command, &command.original);

        assert_eq!(outcome.message(), "Ports \"99999, http\" are not valid UNIX ports.");
        assert_eq!(outcome.location(), LocationRange::new(1, 7, 1, 20));
    }
}
