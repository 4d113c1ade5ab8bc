//! `COPY` rules.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::ast::CopyCommand;
use crate::lint::{Rule, RuleContext, RuleOutcome, Severity, Validator};

static WRONG_FLAG_DASHES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^-])((?:-|-{3,})?(?:chmod|chown|from) ?=)")
        .expect("WRONG_FLAG_DASHES regex must compile")
});

static OCTAL_PERMISSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-7]{1,4}$").expect("OCTAL_PERMISSION regex must compile"));

static USER_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    let part = r"(?:[A-Za-z0-9_][A-Za-z0-9_.\-]*|\$[A-Za-z_][A-Za-z0-9_]*|\$\{[A-Za-z_][A-Za-z0-9_]*\})";
    Regex::new(&format!("^{part}(?::{part})?$")).expect("USER_GROUP regex must compile")
});

/// Extensions `ADD` unpacks automatically.
const ARCHIVE_EXTENSIONS: &[&str] = &[
    "gz", "lz", "lzo", "lzma", "tar", "tb2", "tbz", "tbz2", "tgz", "tlz", "tpz", "txz", "tZ",
    "xz", "Z", "bz2",
];

pub const CPY001: Rule = Rule::new(
    "CPY001",
    "Flag format validation | COPY --[chmod|chown|from]=... srcList... dest|destDir",
    "The `chmod`, `chown` and `from` flags of COPY must be prefixed with exactly \
     two dashes. Otherwise they are taken for source paths.",
    Severity::Error,
    Validator::Copy(flag_dashes),
);

pub const CPY002: Rule = Rule::new(
    "CPY002",
    "COPY --chmod=XXXX where XXXX should be a valid permission set value.",
    "`--chmod` takes an octal permission value of one to four digits.",
    Severity::Error,
    Validator::Copy(chmod_value),
);

pub const CPY003: Rule = Rule::new(
    "CPY003",
    "COPY chown flag should be in --chown=${USER}:${GROUP} format.",
    "`--chown` takes a user, optionally followed by `:` and a group. Each part is \
     a name, a numeric ID or a build argument.",
    Severity::Error,
    Validator::Copy(chown_value),
);

pub const CPY004: Rule = Rule::new(
    "CPY004",
    "COPY with more than one source requires the destination to end with \"/\".",
    "When several sources are copied the destination must be a directory, and \
     the builder only treats it as one when it ends with a slash.",
    Severity::Error,
    Validator::Copy(multi_source_dest),
);

pub const CPY005: Rule = Rule::new(
    "CPY005",
    "Prefer ADD over COPY for extracting local archives into an image.",
    "ADD unpacks local tar archives into the destination. Copying the archive and \
     unpacking it in a RUN leaves the archive in an image layer.",
    Severity::Warning,
    Validator::Copy(local_archive),
);

fn flag_dashes(copy: &CopyCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let outcome = RuleOutcome::pass(ctx.coarse(&copy.location));
    match WRONG_FLAG_DASHES.captures(&copy.original).and_then(|caps| caps.get(1)) {
        Some(flag) => outcome
            .mark_violated()
            .with_message("Flags must be prefixed with exactly two dashes.")
            .with_location(ctx.locate(flag.as_str(), &copy.location)),
        None => outcome,
    }
}

fn chmod_value(copy: &CopyCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let outcome = RuleOutcome::pass(ctx.coarse(&copy.location));
    let chmod = copy.chmod.as_str();
    if chmod.is_empty() || chmod.contains('$') || OCTAL_PERMISSION.is_match(chmod) {
        return outcome;
    }
    outcome
        .mark_violated()
        .with_message("Invalid Unix permission value.")
        .with_location(ctx.locate(chmod, &copy.location))
}

fn chown_value(copy: &CopyCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let outcome = RuleOutcome::pass(ctx.coarse(&copy.location));
    let chown = copy.chown.as_str();
    if chown.is_empty() || USER_GROUP.is_match(chown) {
        return outcome;
    }
    outcome
        .mark_violated()
        .with_message("Invalid user and group pair")
        .with_location(ctx.locate(chown, &copy.location))
}

fn multi_source_dest(copy: &CopyCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let outcome = RuleOutcome::pass(ctx.coarse(&copy.location));
    if copy.sources().len() < 2 {
        return outcome;
    }
    match copy.dest() {
        Some(dest) if !dest.ends_with('/') => outcome
            .mark_violated()
            .with_location(ctx.locate(dest, &copy.location)),
        _ => outcome,
    }
}

fn local_archive(copy: &CopyCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let outcome = RuleOutcome::pass(ctx.coarse(&copy.location));
    // Files from another stage or image are never unpacked by ADD.
    if !copy.from.is_empty() {
        return outcome;
    }
    let archive = copy.sources().iter().find(|source| {
        Path::new(source.as_str())
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ARCHIVE_EXTENSIONS.contains(&ext))
    });
    match archive {
        Some(source) => outcome
            .mark_violated()
            .with_location(ctx.locate(source, &copy.location)),
        None => outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SourceRange;
    use crate::lint::rules::testing::check_with_text;
    use crate::location::LocationRange;

    fn copy(original: &str) -> CopyCommand {
        CopyCommand {
            original: original.to_string(),
            location: vec![SourceRange::line(1)],
            ..Default::default()
        }
    }

    fn copy_paths(paths: &[&str]) -> CopyCommand {
        CopyCommand {
            sources_and_dest: paths.iter().map(|p| p.to_string()).collect(),
            original: format!("COPY {}", paths.join(" ")),
            location: vec![SourceRange::line(1)],
            ..Default::default()
        }
    }

    #[test]
    fn two_dash_flags_pass() {
        let ctx = RuleContext::detached();
        for original in [
            "COPY --chmod=7780 src src2 dst/",
            "COPY --chmod=7780 chmod chmod.bak/",
            "COPY --from=build --chown=app:app /out /srv/",
        ] {
            assert!(!flag_dashes(&copy(original), &ctx).is_violated(), "{}", original);
        }
    }

    #[test]
    fn wrong_dash_count_is_violation() {
        let ctx = RuleContext::detached();
        for original in [
            "COPY -chmod=7780 src dst/",
            "COPY chmod=7780 src dst/",
            "COPY -chown=user:user -chmod=7780 src dst/",
            "COPY -chmod=7780 chmod chmod.bak/",
            "COPY ---from=build /a /b",
        ] {
            let outcome = flag_dashes(&copy(original), &ctx);
            assert!(outcome.is_violated(), "{}", original);
            assert_eq!(outcome.message(), "Flags must be prefixed with exactly two dashes.");
        }
    }

    #[test]
    fn wrong_flag_is_located() {
        let command = copy("COPY -chmod=7780 src dst/");
        let outcome = check_with_text(flag_dashes, &command, &command.original);

        assert_eq!(outcome.location(), LocationRange::new(1, 5, 1, 12));
    }

    #[test]
    fn chmod_values() {
        let ctx = RuleContext::detached();
        for (value, violated) in [
            ("644", false),
            ("0755", false),
            ("7", false),
            ("$PERMS", false),
            ("7780", true),
            ("u+x", true),
            ("07555", true),
        ] {
            let command = CopyCommand {
                chmod: value.to_string(),
                ..copy("COPY")
            };
            assert_eq!(chmod_value(&command, &ctx).is_violated(), violated, "{}", value);
        }
    }

    #[test]
    fn chown_values() {
        let ctx = RuleContext::detached();
        for (value, violated) in [
            ("55:mygroup", false),
            ("bin", false),
            ("1", false),
            ("10:11", false),
            ("www-data:www-data", false),
            ("${UID}:${GID}", false),
            ("$USER", false),
            ("10;11", true),
            ("10,11", true),
            ("$$", true),
            ("55:11,22", true),
            ("55:11 22", true),
            (":group", true),
        ] {
            let command = CopyCommand {
                chown: value.to_string(),
                ..copy("COPY")
            };
            assert_eq!(chown_value(&command, &ctx).is_violated(), violated, "{}", value);
        }
    }

    #[test]
    fn chown_is_located() {
        let command = CopyCommand {
            chown: "10,11".to_string(),
            ..copy("COPY --chown=10,11 src dst")
        };
        let outcome = check_with_text(chown_value, &command, &command.original);

        assert_eq!(outcome.message(), "Invalid user and group pair");
        assert_eq!(outcome.location(), LocationRange::new(1, 13, 1, 18));
    }

    #[test]
    fn multiple_sources_need_directory_dest() {
        let ctx = RuleContext::detached();

        assert!(multi_source_dest(&copy_paths(&["a", "b", "dst"]), &ctx).is_violated());
        assert!(!multi_source_dest(&copy_paths(&["a", "b", "dst/"]), &ctx).is_violated());
        assert!(!multi_source_dest(&copy_paths(&["a", "dst"]), &ctx).is_violated());
        assert!(!multi_source_dest(&copy_paths(&[]), &ctx).is_violated());
    }

    #[test]
    fn multi_source_dest_is_located() {
        let command = copy_paths(&["a", "b", "dst"]);
        let outcome = check_with_text(multi_source_dest, &command, &command.original);

        assert_eq!(outcome.location(), LocationRange::new(1, 9, 1, 12));
    }

    #[test]
    fn local_archive_is_violation() {
        let command = copy_paths(&["app.tar.gz", "/srv/"]);
        let outcome = check_with_text(local_archive, &command, &command.original);

        assert!(outcome.is_violated());
        assert_eq!(outcome.location(), LocationRange::new(1, 5, 1, 15));
    }

    #[test]
    fn non_archives_and_stage_copies_pass() {
        let ctx = RuleContext::detached();
        assert!(!local_archive(&copy_paths(&["app.jar", "/srv/"]), &ctx).is_violated());
        assert!(!local_archive(&copy_paths(&["archive.tgz"]), &ctx).is_violated());

        let from_stage = CopyCommand {
            from: "build".to_string(),
            ..copy_paths(&["/out/app.tgz", "/srv/"])
        };
        assert!(!local_archive(&from_stage, &ctx).is_violated());
    }
}
