//! Protocol tokens a device can speak or a hub can redistribute.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A radio or wired protocol.
///
/// The set is open: unknown tokens are kept in [`Protocol::Other`] so that
/// layouts written for newer device catalogues still load. Every token is
/// trimmed and lowercased first, so `"LoRa"` on a device matches `"lora"` on
/// a hub.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Protocol {
    Wifi,
    Zigbee,
    Matter,
    Sub1g,
    Bluetooth,
    Ethernet,
    Other(String),
}

impl Protocol {
    /// Protocols that need a hub to bridge them onto the network.
    ///
    /// A device placed in the `hub` bucket that speaks any of these is a hub;
    /// otherwise it is a router.
    #[must_use]
    pub fn is_hub_radio(&self) -> bool {
        matches!(
            self,
            Self::Zigbee | Self::Matter | Self::Sub1g | Self::Bluetooth
        )
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Wifi => "wifi",
            Self::Zigbee => "zigbee",
            Self::Matter => "matter",
            Self::Sub1g => "sub1g",
            Self::Bluetooth => "bluetooth",
            Self::Ethernet => "ethernet",
            Self::Other(token) => token,
        }
    }
}

impl From<&str> for Protocol {
    fn from(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "wifi" | "wi-fi" => Self::Wifi,
            "zigbee" => Self::Zigbee,
            "matter" => Self::Matter,
            "sub1g" => Self::Sub1g,
            "bluetooth" | "ble" => Self::Bluetooth,
            "ethernet" => Self::Ethernet,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Protocol {
    fn from(token: String) -> Self {
        Self::from(token.as_str())
    }
}

impl From<Protocol> for String {
    fn from(protocol: Protocol) -> Self {
        protocol.as_str().to_string()
    }
}

impl FromStr for Protocol {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
