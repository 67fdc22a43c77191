// ── Domain types ──

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// One of the four supported controller product families.
///
/// The kebab-case form (`fabric-controller`, ...) is used on the wire,
/// in the registry file, and in log fields.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Domain {
    FabricController,
    CloudAccessController,
    AssuranceController,
    WanOverlayController,
}

impl Domain {
    /// All domains in declaration order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Free-text keywords that select this domain at the consumer boundary.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::FabricController => &["fabric", "aci"],
            Self::CloudAccessController => &["cloud", "meraki"],
            Self::AssuranceController => &["assurance", "catalyst"],
            Self::WanOverlayController => &["wan", "overlay"],
        }
    }
}

/// Attribution of a record: a domain, or the aggregator itself.
///
/// Serializes as a plain string: the domain's kebab-case name or `"system"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DomainTag {
    Domain(Domain),
    /// Fault in the fan-out machinery, not attributable to a single site.
    System,
}

impl DomainTag {
    const SYSTEM: &'static str = "system";

    /// The domain, unless this is the system sentinel.
    pub fn domain(self) -> Option<Domain> {
        match self {
            Self::Domain(d) => Some(d),
            Self::System => None,
        }
    }
}

impl From<Domain> for DomainTag {
    fn from(domain: Domain) -> Self {
        Self::Domain(domain)
    }
}

impl fmt::Display for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(d) => fmt::Display::fmt(d, f),
            Self::System => f.write_str(Self::SYSTEM),
        }
    }
}

impl FromStr for DomainTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::SYSTEM {
            return Ok(Self::System);
        }
        Domain::from_str(s)
            .map(Self::Domain)
            .map_err(|_| format!("unknown domain tag '{s}'"))
    }
}

impl From<DomainTag> for String {
    fn from(tag: DomainTag) -> Self {
        tag.to_string()
    }
}

impl TryFrom<String> for DomainTag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
