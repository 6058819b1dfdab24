//! Colours and dash patterns per link kind.

use std::fmt;

use serde::{Serialize, Serializer};

use roomlink_domain::protocol::Protocol;

/// A 24-bit RGB colour, serialised as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const WIFI: Self = Self(0x003b_82f6);
    pub const ZIGBEE: Self = Self(0x00f5_9e0b);
    pub const MATTER: Self = Self(0x00a8_55f7);
    pub const SUB1G: Self = Self(0x0063_66f1);
    pub const NEUTRAL: Self = Self(0x0094_a3b8);
    pub const OFFLINE: Self = Self(0x00ef_4444);
    pub const LOGIC: Self = Self(0x0022_c55e);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00ff_ffff)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How a dashed line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkStyle {
    pub color: Color,
    pub dash_size: f64,
    pub gap_size: f64,
}

impl LinkStyle {
    /// Used for protocols without a dedicated style.
    pub const DEFAULT: Self = Self::new(Color::NEUTRAL, 0.2, 0.1);

    /// Automation links, drawn apart from network links.
    pub const LOGIC: Self = Self::new(Color::LOGIC, 0.15, 0.15);

    #[must_use]
    pub const fn new(color: Color, dash_size: f64, gap_size: f64) -> Self {
        Self {
            color,
            dash_size,
            gap_size,
        }
    }

    /// Style of a network link carried over `protocol`.
    #[must_use]
    pub fn for_protocol(protocol: &Protocol) -> Self {
        match protocol {
            Protocol::Wifi => Self::new(Color::WIFI, 0.4, 0.1),
            Protocol::Zigbee => Self::new(Color::ZIGBEE, 0.2, 0.1),
            Protocol::Matter => Self::new(Color::MATTER, 0.3, 0.2),
            Protocol::Sub1g => Self::new(Color::SUB1G, 0.1, 0.1),
            _ => Self::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_color_as_hex() {
        assert_eq!(Color::WIFI.to_string(), "#3b82f6");
        assert_eq!(Color(0x0a).to_string(), "#00000a");
    }

    #[test]
    fn should_style_known_protocols_distinctly() {
        let styles = [
            LinkStyle::for_protocol(&Protocol::Wifi),
            LinkStyle::for_protocol(&Protocol::Zigbee),
            LinkStyle::for_protocol(&Protocol::Matter),
            LinkStyle::for_protocol(&Protocol::Sub1g),
            LinkStyle::DEFAULT,
            LinkStyle::LOGIC,
        ];
        for (i, a) in styles.iter().enumerate() {
            for b in &styles[i + 1..] {
                assert_ne!(a.color, b.color);
            }
        }
    }

    #[test]
    fn should_fall_back_to_default_style() {
        assert_eq!(
            LinkStyle::for_protocol(&Protocol::from("thread")),
            LinkStyle::DEFAULT
        );
        assert_eq!(
            LinkStyle::for_protocol(&Protocol::Bluetooth),
            LinkStyle::DEFAULT
        );
    }

    #[test]
    fn should_use_wide_dashes_for_wifi() {
        let style = LinkStyle::for_protocol(&Protocol::Wifi);
        assert!((style.dash_size - 0.4).abs() < f64::EPSILON);
        assert!((style.gap_size - 0.1).abs() < f64::EPSILON);
    }
}
