use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A social network that content can be published to.
///
/// `Whatsapp` is a recognised value (content is generated for it) but no
/// publisher exists for it, so selecting it fails as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Linkedin,
    Tiktok,
    Whatsapp,
}

impl Platform {
    /// Every platform value, in declaration order.
    pub const ALL: [Platform; 5] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::Linkedin,
        Platform::Tiktok,
        Platform::Whatsapp,
    ];

    /// Lowercase wire name of the platform.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Linkedin => "linkedin",
            Self::Tiktok => "tiktok",
            Self::Whatsapp => "whatsapp",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownPlatform(s.to_owned()))
    }
}
