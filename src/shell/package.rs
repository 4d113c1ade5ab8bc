//! Package-manager catalog.
//!
//! Only binaries listed here get a recognized sub-command when a shell
//! command is parsed.

use std::fmt;

/// A package-manager binary the parser knows the sub-commands of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Apt,
    AptGet,
    Snap,
    Yum,
    Apk,
    Npm,
    Pip,
    Conda,
    Gem,
    Zypper,
    Dnf,
}

/// Distribution or ecosystem a package manager installs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageFamily {
    Debian,
    Python,
    Rpm,
    Npm,
    Alpine,
    Ruby,
    Suse,
    Fedora,
}

impl PackageManager {
    pub const ALL: [PackageManager; 11] = [
        PackageManager::Apt,
        PackageManager::AptGet,
        PackageManager::Snap,
        PackageManager::Yum,
        PackageManager::Apk,
        PackageManager::Npm,
        PackageManager::Pip,
        PackageManager::Conda,
        PackageManager::Gem,
        PackageManager::Zypper,
        PackageManager::Dnf,
    ];

    /// Look up a package manager by binary name.
    pub fn from_bin(bin: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pm| pm.bin() == bin)
    }

    /// Binary name.
    pub fn bin(&self) -> &'static str {
        match self {
            PackageManager::Apt => "apt",
            PackageManager::AptGet => "apt-get",
            PackageManager::Snap => "snap",
            PackageManager::Yum => "yum",
            PackageManager::Apk => "apk",
            PackageManager::Npm => "npm",
            PackageManager::Pip => "pip",
            PackageManager::Conda => "conda",
            PackageManager::Gem => "gem",
            PackageManager::Zypper => "zypper",
            PackageManager::Dnf => "dnf",
        }
    }

    /// Sub-commands recognized right after the binary.
    pub fn subcommands(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Apt | PackageManager::AptGet => {
                &["clean", "install", "remove", "purge", "update", "upgrade", "dist-upgrade"]
            }
            PackageManager::Snap => &["install", "remove", "refresh", "download"],
            PackageManager::Yum => &[
                "clean",
                "install",
                "remove",
                "update",
                "upgrade",
                "distro-sync",
                "dsync",
                "downgrade",
            ],
            PackageManager::Apk => &["cache", "add", "del", "update", "upgrade"],
            PackageManager::Npm => &["install", "i", "update", "list", "ls", "view", "outdated"],
            PackageManager::Pip => &["install", "freeze", "list", "download"],
            PackageManager::Conda => &[
                "clean",
                "install",
                "uninstall",
                "update",
                "config",
                "active",
                "deactivate",
                "env",
            ],
            PackageManager::Gem => &[
                "cleanup",
                "install",
                "uninstall",
                "update",
                "build",
                "push",
                "list",
            ],
            PackageManager::Zypper => &[
                "install",
                "in",
                "remove",
                "rm",
                "update",
                "up",
                "dist-upgrade",
                "dup",
                "refresh",
                "addrepo",
            ],
            PackageManager::Dnf => &[
                "clean",
                "install",
                "remove",
                "update",
                "upgrade",
                "up",
                "list",
                "distro-sync",
                "dsync",
                "downgrade",
            ],
        }
    }

    /// Whether `word` is one of this manager's sub-commands.
    pub fn is_subcommand(&self, word: &str) -> bool {
        self.subcommands().contains(&word)
    }

    /// Sub-commands that install packages.
    pub fn install_subcommands(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Apk => &["add"],
            PackageManager::Npm => &["install", "i"],
            PackageManager::Zypper => &["install", "in"],
            _ => &["install"],
        }
    }

    pub fn family(&self) -> PackageFamily {
        match self {
            PackageManager::Apt | PackageManager::AptGet | PackageManager::Snap => {
                PackageFamily::Debian
            }
            PackageManager::Pip | PackageManager::Conda => PackageFamily::Python,
            PackageManager::Yum => PackageFamily::Rpm,
            PackageManager::Apk => PackageFamily::Alpine,
            PackageManager::Npm => PackageFamily::Npm,
            PackageManager::Gem => PackageFamily::Ruby,
            PackageManager::Zypper => PackageFamily::Suse,
            PackageManager::Dnf => PackageFamily::Fedora,
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bin())
    }
}

impl fmt::Display for PackageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PackageFamily::Debian => "Debian",
            PackageFamily::Python => "Python",
            PackageFamily::Rpm => "RPM",
            PackageFamily::Npm => "NPM",
            PackageFamily::Alpine => "Alpine",
            PackageFamily::Ruby => "Ruby",
            PackageFamily::Suse => "Suse",
            PackageFamily::Fedora => "Fedora",
        };
        f.write_str(name)
    }
}
