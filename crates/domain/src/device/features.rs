//! Catalogue features attached to a device.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::protocol::Protocol;

/// Device features as declared by the device catalogue.
///
/// `serves_protocols` is only meaningful for hubs. A hub without it serves
/// nothing: there is no "serves everything" default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Features {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serves_protocols: Option<Vec<Protocol>>,
    #[serde(default)]
    pub requires_hub: bool,
    #[serde(default)]
    pub is_master: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_m: Option<f64>,
    /// Catalogue keys this crate does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Features {
    /// Features of a hub redistributing `protocols`.
    #[must_use]
    pub fn serving<I, P>(protocols: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Protocol>,
    {
        Self {
            serves_protocols: Some(protocols.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Whether `protocol` is redistributed.
    #[must_use]
    pub fn serves(&self, protocol: &Protocol) -> bool {
        self.serves_protocols
            .as_deref()
            .is_some_and(|served| served.contains(protocol))
    }

    /// The first of `wanted` (in its own order) that is redistributed.
    pub fn first_served<'a, I>(&self, wanted: I) -> Option<&'a Protocol>
    where
        I: IntoIterator<Item = &'a Protocol>,
    {
        wanted.into_iter().find(|p| self.serves(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serve_nothing_when_list_is_absent() {
        let features = Features::default();
        assert!(!features.serves(&Protocol::Zigbee));
        assert!(!features.serves(&Protocol::Wifi));
    }

    #[test]
    fn should_pick_first_wanted_protocol_that_is_served() {
        let features = Features::serving(["sub1g", "zigbee"]);
        let wanted = [Protocol::Matter, Protocol::Zigbee, Protocol::Sub1g];
        assert_eq!(features.first_served(&wanted), Some(&Protocol::Zigbee));
    }

    #[test]
    fn should_keep_unknown_catalogue_keys() {
        let json = r#"{"serves_protocols": ["zigbee"], "battery": "CR2032", "range_m": 12.5}"#;
        let features: Features = serde_json::from_str(json).unwrap();
        assert_eq!(features.range_m, Some(12.5));
        assert_eq!(
            features.extra.get("battery"),
            Some(&serde_json::Value::String("CR2032".to_string()))
        );
    }
}
