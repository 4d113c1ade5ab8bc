//! `RUN` rules about package managers.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::{locate_in_chain, shell_chain};
use crate::ast::ExecCommand;
use crate::lint::{Rule, RuleContext, RuleOutcome, Severity, Validator};
use crate::shell::{BashCommand, PackageFamily, PackageManager};

/// Above this many characters the package names are replaced by a count.
const MAX_LISTED_PACKAGES_LEN: usize = 60;

static RPM_VERSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\d").expect("RPM_VERSION_SUFFIX regex must compile"));

static APT_CLEANUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(apt clean|rm -rf /var/lib/apt/lists)").expect("APT_CLEANUP regex must compile")
});
static APT_GET_CLEANUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(apt-get clean|rm -rf /var/lib/apt/lists)")
        .expect("APT_GET_CLEANUP regex must compile")
});
static YUM_CLEANUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"yum clean all").expect("YUM_CLEANUP regex must compile"));
static APK_CLEANUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"apk(.*)--no-cache").expect("APK_CLEANUP regex must compile"));
static PIP_CLEANUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pip(.*)--no-cache-dir").expect("PIP_CLEANUP regex must compile"));
static ZYPPER_CLEANUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"zypper (clean|-a)").expect("ZYPPER_CLEANUP regex must compile"));
static DNF_CLEANUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"dnf clean all").expect("DNF_CLEANUP regex must compile"));

pub const RUN002: Rule = Rule::new(
    "RUN002",
    "Pin versions in package manager installs.",
    "Unpinned packages install whatever is current at build time, so two builds \
     of the same Dockerfile can produce different images.",
    Severity::Warning,
    Validator::Run(unpinned_packages),
);

pub const RUN005: Rule = Rule::new(
    "RUN005",
    "Do not use upgrade commands.",
    "Upgrading every package of the base image makes the build depend on the day \
     it runs. Pull a newer base image instead.",
    Severity::Error,
    Validator::Run(upgrade_commands),
);

pub const RUN006: Rule = Rule::new(
    "RUN006",
    "Delete the package manager cache after installing packages.",
    "The package index fetched by an update stays in the layer unless it is \
     removed in the same RUN.",
    Severity::Warning,
    Validator::Run(leftover_cache),
);

pub const RUN009: Rule = Rule::new(
    "RUN009",
    "Use the -y switch to avoid manual input.",
    "Builds are not interactive. Without an assume-yes flag the package manager \
     waits for a confirmation that never comes.",
    Severity::Warning,
    Validator::Run(missing_assume_yes),
);

pub const RUN010: Rule = Rule::new(
    "RUN010",
    "Avoid additional packages by specifying --no-install-recommends.",
    "Recommended packages are pulled in by default and grow the image with \
     software nothing asked for.",
    Severity::Warning,
    Validator::Run(install_recommends),
);

fn unpinned_packages(run: &ExecCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let chain = shell_chain(run);
    let unpinned: BTreeSet<&str> = chain
        .iter()
        .filter_map(|command| command.package_install().map(|family| (command, family)))
        .filter(|(command, _)| !installs_from_requirements(command))
        .flat_map(|(command, family)| {
            command
                .args
                .iter()
                .filter(|(name, _)| is_package_name(name))
                .filter(move |(name, version)| !is_pinned(command, family, name, version))
                .map(|(name, _)| name.as_str())
        })
        .collect();

    let outcome = RuleOutcome::pass(ctx.coarse(&run.location));
    if unpinned.is_empty() {
        return outcome;
    }
    let names: Vec<&str> = unpinned.into_iter().collect();
    outcome
        .mark_violated()
        .with_message(unpinned_message(&names))
        .with_location(ctx.locate_union(&names, &run.location))
}

fn installs_from_requirements(command: &BashCommand) -> bool {
    command.package_manager() == Some(PackageManager::Pip)
        && command.has_any_option(&["-r", "--requirement", "-e"])
}

fn is_package_name(word: &str) -> bool {
    !word.is_empty()
        && !word.starts_with(['-', '.', '/'])
        && !word.contains("://")
}

fn is_pinned(command: &BashCommand, family: PackageFamily, name: &str, version: &str) -> bool {
    match family {
        PackageFamily::Rpm | PackageFamily::Fedora => {
            !version.is_empty() || RPM_VERSION_SUFFIX.is_match(name)
        }
        PackageFamily::Npm => name.get(1..).is_some_and(|rest| rest.contains('@')),
        PackageFamily::Ruby => {
            name.contains(':')
                || command.has_any_option(&["-v", "--version"])
                || command.args.contains_key("-v")
                || command.args.contains_key("--version")
        }
        _ => !version.is_empty(),
    }
}

fn unpinned_message(names: &[&str]) -> String {
    let listed = names.join(", ");
    match names {
        _ if listed.len() >= MAX_LISTED_PACKAGES_LEN => {
            if names.len() == 1 {
                "1 package has no version specified.".to_string()
            } else {
                format!("{} packages have no version specified.", names.len())
            }
        }
        [single] => format!("Package \"{}\" has no version specified.", single),
        _ => format!("Packages \"{}\" have no version specified.", listed),
    }
}

fn upgrade_subcommands(pm: PackageManager) -> &'static [&'static str] {
    match pm {
        PackageManager::Apt | PackageManager::AptGet => &["upgrade", "dist-upgrade"],
        PackageManager::Apk => &["upgrade"],
        PackageManager::Dnf => &["upgrade", "up", "distro-sync", "downgrade"],
        PackageManager::Yum => &["upgrade", "distro-sync", "dsync", "downgrade"],
        PackageManager::Zypper => &["update", "up", "dist-upgrade"],
        _ => &[],
    }
}

fn upgrade_commands(run: &ExecCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let chain = shell_chain(run);
    chain
        .iter()
        .enumerate()
        .fold(RuleOutcome::pass(ctx.coarse(&run.location)), |acc, (idx, command)| {
            let upgrade = command.package_manager().zip(command.sub_command()).and_then(
                |(pm, sub_command)| upgrade_subcommands(pm).contains(&sub_command).then_some(sub_command),
            );
            match upgrade {
                Some(sub_command) => acc
                    .mark_violated()
                    .with_location(locate_in_chain(ctx, &chain, idx, sub_command, &run.location)),
                None => acc,
            }
        })
}

fn cleanup_pattern(pm: PackageManager) -> Option<&'static Regex> {
    let pattern = match pm {
        PackageManager::Apt => &APT_CLEANUP,
        PackageManager::AptGet => &APT_GET_CLEANUP,
        PackageManager::Yum => &YUM_CLEANUP,
        PackageManager::Apk => &APK_CLEANUP,
        PackageManager::Pip => &PIP_CLEANUP,
        PackageManager::Zypper => &ZYPPER_CLEANUP,
        PackageManager::Dnf => &DNF_CLEANUP,
        _ => return None,
    };
    Some(LazyLock::force(pattern))
}

/// An index update must be cleaned up by the same command or a later one.
fn leftover_cache(run: &ExecCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let chain = shell_chain(run);
    let commands = chain.commands();
    let mut outcome = RuleOutcome::pass(ctx.coarse(&run.location));

    for (idx, command) in commands.iter().enumerate() {
        if !command.is_package_update() {
            continue;
        }
        let Some(cleanup) = command.package_manager().and_then(cleanup_pattern) else {
            continue;
        };
        let cleaned = commands[idx..].iter().any(|later| cleanup.is_match(&later.raw));
        if !cleaned {
            outcome = outcome
                .mark_violated()
                .with_location(locate_in_chain(ctx, &chain, idx, &command.bin, &run.location));
        }
    }
    outcome
}

const APT_ASSUME_YES: &[&str] = &["-y", "--yes", "--assume-yes"];
const RPM_ASSUME_YES: &[&str] = &["-y", "--assumeyes"];
const ZYPPER_ASSUME_YES: &[&str] = &["-y", "--no-confirm", "-n", "--non-interactive"];

fn assume_yes_flags(pm: PackageManager, sub_command: &str) -> Option<&'static [&'static str]> {
    match pm {
        PackageManager::Apt | PackageManager::AptGet
            if matches!(sub_command, "install" | "remove" | "purge") =>
        {
            Some(APT_ASSUME_YES)
        }
        PackageManager::Dnf | PackageManager::Yum
            if matches!(sub_command, "install" | "remove" | "downgrade") =>
        {
            Some(RPM_ASSUME_YES)
        }
        PackageManager::Zypper if matches!(sub_command, "install" | "in" | "remove" | "rm") => {
            Some(ZYPPER_ASSUME_YES)
        }
        _ => None,
    }
}

/// Whether any of `flags` was given anywhere on the command line.
fn has_flag(command: &BashCommand, flags: &[&str]) -> bool {
    command.has_any_option(flags) || flags.iter().any(|flag| command.args.contains_key(*flag))
}

fn missing_assume_yes(run: &ExecCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let chain = shell_chain(run);
    chain
        .iter()
        .enumerate()
        .fold(RuleOutcome::pass(ctx.coarse(&run.location)), |acc, (idx, command)| {
            let flags = command
                .package_manager()
                .zip(command.sub_command())
                .and_then(|(pm, sub_command)| assume_yes_flags(pm, sub_command));
            match flags {
                Some(flags) if !has_flag(command, flags) => acc
                    .mark_violated()
                    .with_location(locate_in_chain(ctx, &chain, idx, &command.bin, &run.location)),
                _ => acc,
            }
        })
}

fn install_recommends(run: &ExecCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let chain = shell_chain(run);
    chain
        .iter()
        .enumerate()
        .fold(RuleOutcome::pass(ctx.coarse(&run.location)), |acc, (idx, command)| {
            let apt_install = matches!(
                command.package_manager(),
                Some(PackageManager::Apt | PackageManager::AptGet)
            ) && command.sub_command() == Some("install");
            if apt_install && !has_flag(command, &["--no-install-recommends"]) {
                acc.mark_violated()
                    .with_location(locate_in_chain(ctx, &chain, idx, "install", &run.location))
            } else {
                acc
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::testing::check_run;
    use crate::location::LocationRange;

    #[test]
    fn pinned_installs_pass() {
        for script in [
            "apt-get install vim=1.12.1",
            "apk add --no-cache git=2.45.2-r0",
            "pip install --no-cache-dir -r requirements.txt",
            "pip install flask==3.0.3",
            "npm install express@4.19.2",
            "npm install @types/node@20.14.0",
            "gem install rails:7.1.3",
            "gem install rails -v 7.1.3",
            "yum install -y httpd-2.4.6",
            "dnf install -y nginx-1.24.0",
            "apt-get install ./local.deb /tmp/other.deb",
            "pip install https://example.com/pkg.tar.gz",
        ] {
            assert!(!check_run(unpinned_packages, script).is_violated(), "{}", script);
        }
    }

    #[test]
    fn unpinned_install_is_violation() {
        let outcome = check_run(unpinned_packages, "apt-get install vim");

        assert!(outcome.is_violated());
        assert_eq!(outcome.message(), "Package \"vim\" has no version specified.");
        assert_eq!(outcome.location(), LocationRange::new(1, 20, 1, 23));
    }

    #[test]
    fn unpinned_packages_are_collected_across_commands() {
        let outcome = check_run(
            unpinned_packages,
            "apt-get install -y vim curl=8.5 && npm install left-pad && apk add bash",
        );

        assert_eq!(
            outcome.message(),
            "Packages \"bash, left-pad, vim\" have no version specified."
        );
    }

    #[test]
    fn long_package_lists_are_counted() {
        let outcome = check_run(
            unpinned_packages,
            "apt-get install -y build-essential ca-certificates curl git gnupg libssl-dev pkg-config",
        );

        assert_eq!(outcome.message(), "7 packages have no version specified.");
    }

    #[test]
    fn unpinned_message_wording() {
        assert_eq!(unpinned_message(&["a", "b"]), "Packages \"a, b\" have no version specified.");
        let long = "x".repeat(MAX_LISTED_PACKAGES_LEN);
        assert_eq!(unpinned_message(&[long.as_str()]), "1 package has no version specified.");
    }

    #[test]
    fn upgrade_commands_are_violations() {
        for script in [
            "apt-get upgrade -y",
            "apt dist-upgrade",
            "apk upgrade",
            "dnf distro-sync",
            "yum downgrade foo",
            "zypper up",
        ] {
            assert!(check_run(upgrade_commands, script).is_violated(), "{}", script);
        }
        for script in ["apt-get update", "yum update", "apk add upgrade", "echo upgrade"] {
            assert!(!check_run(upgrade_commands, script).is_violated(), "{}", script);
        }
    }

    #[test]
    fn upgrade_is_located() {
        let outcome = check_run(upgrade_commands, "apt-get update && apt-get upgrade -y");

        assert_eq!(outcome.location(), LocationRange::new(1, 30, 1, 37));
    }

    #[test]
    fn repeated_upgrade_is_located_in_last_offender() {
        let outcome = check_run(
            upgrade_commands,
            "apt-get upgrade -y && echo upgrade && apk upgrade",
        );

        assert_eq!(outcome.location(), LocationRange::new(1, 46, 1, 53));
    }

    #[test]
    fn cache_cleanup() {
        for (script, violated) in [
            ("apt-get update && apt-get install -y vim=1.2.3 && apt-get clean", false),
            ("apt-get update && apt-get install -y vim && rm -rf /var/lib/apt/lists/*", false),
            ("apt update && apt install vim", true),
            ("yum update -y && yum install -y git && date", true),
            ("yum update -y && yum install -y git && yum clean all", false),
            ("apk add --update --no-cache git", false),
            ("apk update && apk add git", true),
            ("pip install --update pytorch", true),
            ("zypper refresh && zypper install -y vim && zypper clean", false),
            ("dnf update -y && dnf install -y vim && dnf clean all", false),
            ("apt-get install -y vim", false),
        ] {
            assert_eq!(check_run(leftover_cache, script).is_violated(), violated, "{}", script);
        }
    }

    #[test]
    fn cleanup_before_update_does_not_count() {
        assert!(check_run(leftover_cache, "apt-get clean && apt-get update").is_violated());
    }

    #[test]
    fn leftover_cache_is_located_on_update_command() {
        let outcome = check_run(leftover_cache, "apt-get install -y git && apt-get update");

        assert!(outcome.is_violated());
        assert_eq!(outcome.location(), LocationRange::new(1, 30, 1, 37));
    }

    #[test]
    fn assume_yes() {
        for (script, violated) in [
            ("apt-get install vim", true),
            ("apt-get install -y vim", false),
            ("apt-get install --assume-yes vim", false),
            ("apt-get install vim -y", false),
            ("apt-get purge vim", true),
            ("yum install --assumeyes git", false),
            ("dnf remove git", true),
            ("zypper in -n vim", false),
            ("zypper rm vim", true),
            ("apt-get update", false),
            ("apk add git", false),
        ] {
            assert_eq!(check_run(missing_assume_yes, script).is_violated(), violated, "{}", script);
        }
    }

    #[test]
    fn assume_yes_is_located_on_binary() {
        let outcome = check_run(missing_assume_yes, "apk update && yum install git");

        assert_eq!(outcome.location(), LocationRange::new(1, 18, 1, 21));
    }

    #[test]
    fn assume_yes_skips_earlier_use_of_same_binary() {
        let outcome = check_run(missing_assume_yes, "apt-get update && apt-get install vim");

        assert_eq!(outcome.location(), LocationRange::new(1, 22, 1, 29));
    }

    #[test]
    fn install_recommends_is_located_in_offending_install() {
        let outcome = check_run(
            install_recommends,
            "apt-get install -y --no-install-recommends curl && apt-get install -y vim",
        );

        assert!(outcome.is_violated());
        assert_eq!(outcome.location(), LocationRange::new(1, 63, 1, 70));
    }

    #[test]
    fn install_recommends_is_violation() {
        let outcome = check_run(install_recommends, "apt-get install -y vim");

        assert!(outcome.is_violated());
        assert_eq!(outcome.location(), LocationRange::new(1, 12, 1, 19));
        assert!(!check_run(install_recommends, "apt-get install -y --no-install-recommends vim").is_violated());
        assert!(!check_run(install_recommends, "apk add vim").is_violated());
    }
}
