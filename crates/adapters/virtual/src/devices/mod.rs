//! One module per family of simulated devices.

mod climate;
mod gateway;
mod presence;
mod socket;

pub use climate::{AirQuality, Humidity, Pressure, Temperature};
pub use gateway::{Camera, Gateway};
pub use presence::{Motion, Opening};
pub use socket::Socket;

/// Round to one decimal place, the precision readings are displayed with.
fn tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
