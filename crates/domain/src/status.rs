//! Status summary: total / online / offline counts for display.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::connection::ConnectionResult;
use crate::device::Device;
use crate::protocol::Protocol;

/// Aggregate view of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    /// Network links per protocol.
    pub links_by_protocol: BTreeMap<Protocol, usize>,
    pub logic_links: usize,
}

impl StatusSummary {
    /// Summarise devices whose `is_connected` flags have already been applied,
    /// together with the results that produced them.
    #[must_use]
    pub fn summarize(devices: &[Device], results: &[ConnectionResult]) -> Self {
        let online = devices.iter().filter(|d| d.is_connected).count();
        let mut links_by_protocol = BTreeMap::new();
        let mut logic_links = 0;
        for result in results {
            match result {
                ConnectionResult::Network { protocol, .. } => {
                    *links_by_protocol.entry(protocol.clone()).or_insert(0) += 1;
                }
                ConnectionResult::Logic { .. } => logic_links += 1,
                ConnectionResult::Offline { .. } => {}
            }
        }
        Self {
            total: devices.len(),
            online,
            offline: devices.len() - online,
            links_by_protocol,
            logic_links,
        }
    }

    /// Whether every device is online.
    #[must_use]
    pub fn all_online(&self) -> bool {
        self.offline == 0
    }
}

impl fmt::Display for StatusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} devices: {} online, {} offline",
            self.total, self.online, self.offline
        )?;
        if !self.links_by_protocol.is_empty() {
            f.write_str(" (")?;
            for (i, (protocol, count)) in self.links_by_protocol.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{protocol}: {count}")?;
            }
            f.write_str(")")?;
        }
        if self.logic_links > 0 {
            write!(f, ", {} automation links", self.logic_links)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(kind: &str, connected: bool) -> Device {
        let mut d = Device::builder().kind(kind).build().unwrap();
        d.is_connected = connected;
        d
    }

    #[test]
    fn should_count_online_and_offline_devices() {
        let devices = vec![
            device("router", true),
            device("motion", true),
            device("light", false),
        ];
        let summary = StatusSummary::summarize(&devices, &[]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.online, 2);
        assert_eq!(summary.offline, 1);
        assert!(!summary.all_online());
    }

    #[test]
    fn should_break_links_down_by_protocol() {
        let hub = device("hub", true);
        let motion = device("motion", true);
        let light = device("light", true);
        let results = vec![
            ConnectionResult::network(&motion, &hub, Protocol::Zigbee),
            ConnectionResult::network(&light, &hub, Protocol::Zigbee),
            ConnectionResult::logic(&motion, &light),
        ];
        let summary = StatusSummary::summarize(&[hub, motion, light], &results);
        assert_eq!(summary.links_by_protocol.get(&Protocol::Zigbee), Some(&2));
        assert_eq!(summary.logic_links, 1);
    }

    #[test]
    fn should_render_one_line_summary() {
        let hub = device("hub", true);
        let plug = device("plug", false);
        let results = vec![ConnectionResult::offline(&plug)];
        let summary = StatusSummary::summarize(&[hub, plug], &results);
        assert_eq!(summary.to_string(), "2 devices: 1 online, 1 offline");
    }

    #[test]
    fn should_summarize_empty_scene() {
        let summary = StatusSummary::summarize(&[], &[]);
        assert_eq!(summary, StatusSummary::default());
        assert!(summary.all_online());
    }
}
