use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Organizations an idea can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Organization {
    #[serde(rename = "Catalyst Group")]
    CatalystGroup,
    #[serde(rename = "Swasti")]
    Swasti,
    #[serde(rename = "Vrutti")]
    Vrutti,
    #[serde(rename = "Fuzhio")]
    Fuzhio,
    #[serde(rename = "Green Foundation")]
    GreenFoundation,
    #[serde(rename = "Catalyst Foundation")]
    CatalystFoundation,
    #[serde(rename = "Solvist Financial Services")]
    SolvistFinancialServices,
    #[serde(rename = "Impact Catalysts Foundation")]
    ImpactCatalystsFoundation,
}

/// Badge colour family used when rendering an organization chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Purple,
    Teal,
    Neutral,
}

impl BadgeTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeTone::Purple => "badge-purple",
            BadgeTone::Teal => "badge-teal",
            BadgeTone::Neutral => "badge-neutral",
        }
    }
}

impl Organization {
    /// Listing order for filters and the submit form.
    pub const ALL: [Organization; 8] = [
        Organization::CatalystGroup,
        Organization::Swasti,
        Organization::Vrutti,
        Organization::Fuzhio,
        Organization::GreenFoundation,
        Organization::CatalystFoundation,
        Organization::SolvistFinancialServices,
        Organization::ImpactCatalystsFoundation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Organization::CatalystGroup => "Catalyst Group",
            Organization::Swasti => "Swasti",
            Organization::Vrutti => "Vrutti",
            Organization::Fuzhio => "Fuzhio",
            Organization::GreenFoundation => "Green Foundation",
            Organization::CatalystFoundation => "Catalyst Foundation",
            Organization::SolvistFinancialServices => "Solvist Financial Services",
            Organization::ImpactCatalystsFoundation => "Impact Catalysts Foundation",
        }
    }

    /// Member organizations alternate purple/teal; the umbrella group stays neutral.
    pub fn tone(&self) -> BadgeTone {
        match self {
            Organization::CatalystGroup => BadgeTone::Neutral,
            Organization::Swasti
            | Organization::Fuzhio
            | Organization::CatalystFoundation
            | Organization::ImpactCatalystsFoundation => BadgeTone::Purple,
            Organization::Vrutti
            | Organization::GreenFoundation
            | Organization::SolvistFinancialServices => BadgeTone::Teal,
        }
    }

    pub fn badge_class(&self) -> &'static str {
        self.tone().css_class()
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOrganization(pub String);

impl fmt::Display for UnknownOrganization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown organization: {}", self.0)
    }
}

impl std::error::Error for UnknownOrganization {}

impl FromStr for Organization {
    type Err = UnknownOrganization;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Organization::ALL
            .iter()
            .copied()
            .find(|org| org.as_str() == trimmed)
            .ok_or_else(|| UnknownOrganization(trimmed.to_string()))
    }
}
