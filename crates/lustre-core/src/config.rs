//! Runtime configuration consumed by the extraction engine.
//!
//! Built once by the caller (the exporter binary maps its CLI flags onto it)
//! and passed by reference into the catalog and the scraper.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How much of a component is exported.
///
/// Levels are additive: `Extended` includes everything `Core` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum EnableLevel {
    Disabled,
    Core,
    #[default]
    Extended,
}

impl EnableLevel {
    pub fn is_enabled(self) -> bool {
        self != EnableLevel::Disabled
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnableLevel::Disabled => "disabled",
            EnableLevel::Core => "core",
            EnableLevel::Extended => "extended",
        }
    }
}

impl fmt::Display for EnableLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnableLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disabled" => Ok(EnableLevel::Disabled),
            "core" => Ok(EnableLevel::Core),
            "extended" => Ok(EnableLevel::Extended),
            other => Err(format!(
                "invalid level '{}': expected one of extended, core, disabled",
                other
            )),
        }
    }
}

/// One enable level per Lustre component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Levels {
    pub ost: EnableLevel,
    pub mdt: EnableLevel,
    pub mgs: EnableLevel,
    pub mds: EnableLevel,
    pub client: EnableLevel,
    pub generic: EnableLevel,
    pub lnet: EnableLevel,
    pub health: EnableLevel,
}

impl Levels {
    /// All components disabled. Handy as a base for enabling a single one.
    pub fn none() -> Self {
        Self {
            ost: EnableLevel::Disabled,
            mdt: EnableLevel::Disabled,
            mgs: EnableLevel::Disabled,
            mds: EnableLevel::Disabled,
            client: EnableLevel::Disabled,
            generic: EnableLevel::Disabled,
            lnet: EnableLevel::Disabled,
            health: EnableLevel::Disabled,
        }
    }
}

/// Where the changelog-user text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LctlMode {
    /// Run `lctl get_param` (through `sudo` when not root).
    Command,
    /// Read a pre-captured file below this directory instead.
    Fixture(PathBuf),
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub levels: Levels,
    /// Root of the procfs-style tree (usually `/proc`).
    pub proc_path: PathBuf,
    /// Root of the sysfs-style tree (usually `/sys`).
    pub sys_path: PathBuf,
    pub lctl: LctlMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            levels: Levels::default(),
            proc_path: PathBuf::from("/proc"),
            sys_path: PathBuf::from("/sys"),
            lctl: LctlMode::Command,
        }
    }
}
