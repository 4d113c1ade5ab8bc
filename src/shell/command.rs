//! A single simple command.

use indexmap::IndexMap;

use super::package::{PackageFamily, PackageManager};

/// Token that marks privilege escalation.
pub const SUDO: &str = "sudo";

/// One simple command out of a command chain.
///
/// Decomposed in a fixed order: leading `NAME=value` assignments, an optional
/// `sudo`, the binary, a recognized package-manager sub-command, a run of
/// leading flags, then positional arguments. Flags after the first positional
/// argument end up in [`args`](Self::args).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BashCommand {
    /// Leading environment assignments, in order.
    pub env_vars: IndexMap<String, String>,
    /// The binary. Empty for an empty command or one made only of assignments.
    pub bin: String,
    /// Recognized sub-command of a package-manager binary.
    pub sub_command: Option<String>,
    /// Leading flags. Values are always empty.
    pub options: IndexMap<String, String>,
    /// Remaining words, `key=value` split on the first `=`.
    pub args: IndexMap<String, String>,
    /// Whether the command was prefixed with `sudo`.
    pub has_sudo: bool,
    /// The words of the command, in order.
    pub words: Vec<String>,
    /// The words of the command joined with spaces.
    pub raw: String,
}

impl BashCommand {
    /// Parse the words of one command.
    pub fn parse<S: AsRef<str>>(words: &[S]) -> Self {
        let words: Vec<String> = words.iter().map(|word| word.as_ref().to_string()).collect();
        let mut command = Self::decompose(&words);
        command.words = words;
        command
    }

    fn decompose(words: &[String]) -> Self {
        let mut command = BashCommand {
            raw: words.join(" "),
            ..Default::default()
        };
        let mut rest = words.iter().map(String::as_str).peekable();

        while let Some((name, value)) = rest.peek().and_then(|word| split_assignment(*word)) {
            command.env_vars.insert(name.to_string(), value.to_string());
            rest.next();
        }

        if rest.peek() == Some(&SUDO) {
            command.has_sudo = true;
            rest.next();
        }

        let Some(bin) = rest.next() else {
            return command;
        };
        command.bin = bin.to_string();

        if let Some(pm) = PackageManager::from_bin(bin) {
            if let Some(word) = rest.next_if(|word| pm.is_subcommand(word)) {
                command.sub_command = Some(word.to_string());
            }
        }

        while let Some(flag) = rest.next_if(|word| word.starts_with('-')) {
            command.options.insert(flag.to_string(), String::new());
        }

        for word in rest {
            let (key, value) = word.split_once('=').unwrap_or((word, ""));
            command.args.insert(key.to_string(), value.to_string());
        }

        command
    }

    /// Whether nothing was parsed.
    pub fn is_empty(&self) -> bool {
        self.bin.is_empty() && self.env_vars.is_empty() && !self.has_sudo
    }

    pub fn sub_command(&self) -> Option<&str> {
        self.sub_command.as_deref()
    }

    /// Option keys, sorted.
    pub fn option_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.options.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.contains_key(option)
    }

    pub fn has_any_option(&self, options: &[&str]) -> bool {
        options.iter().any(|option| self.has_option(option))
    }

    /// Positional argument keys in order.
    pub fn arg_keys(&self) -> impl Iterator<Item = &str> {
        self.args.keys().map(String::as_str)
    }

    /// Package manager this command runs, if known.
    pub fn package_manager(&self) -> Option<PackageManager> {
        PackageManager::from_bin(&self.bin)
    }

    /// Family of packages being installed, if this is an install command.
    pub fn package_install(&self) -> Option<PackageFamily> {
        let pm = self.package_manager()?;
        let sub_command = self.sub_command()?;
        pm.install_subcommands()
            .contains(&sub_command)
            .then(|| pm.family())
    }

    /// Whether this command refreshes the package index (and so leaves a
    /// cache behind).
    pub fn is_package_update(&self) -> bool {
        let Some(pm) = self.package_manager() else {
            return false;
        };
        let sub_command = self.sub_command();
        match pm {
            PackageManager::Apt | PackageManager::AptGet => sub_command == Some("update"),
            PackageManager::Apk => {
                sub_command == Some("update")
                    || (sub_command == Some("add") && self.has_option("--update"))
            }
            PackageManager::Pip => self.has_any_option(&["-U", "--upgrade", "--update"]),
            PackageManager::Yum | PackageManager::Dnf => sub_command == Some("update"),
            PackageManager::Zypper => sub_command == Some("refresh"),
            _ => false,
        }
    }
}

/// Split `NAME=value` where `NAME` is a valid variable name. An empty value
/// ends the assignments, so `FOO=` alone is taken as the binary.
fn split_assignment(word: &str) -> Option<(&str, &str)> {
    let (name, value) = word.split_once('=')?;
    let mut chars = name.chars();
    let first = chars.next()?;
    let valid = (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    (valid && !value.is_empty()).then_some((name, value))
}
