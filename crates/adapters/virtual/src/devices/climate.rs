//! Climate sensors: temperature, humidity, pressure, and air quality.

use rand::Rng;
use rand::rngs::StdRng;
use roomlink_app::ports::DeviceBehaviour;
use roomlink_domain::reading::Reading;

use super::tenths;

/// A temperature sensor with a per-device base value and on/off control.
///
/// While on, the temperature drifts slowly around its base value and the
/// humidity swings around 45 %. While off, only the status is reported.
pub struct Temperature {
    base: f64,
    on: bool,
}

impl Temperature {
    /// Draw a base temperature between 21 and 23 °C.
    pub fn new(rng: &mut impl Rng) -> Self {
        Self::with_base(21.0 + rng.gen_range(0.0..2.0))
    }

    #[must_use]
    pub fn with_base(base: f64) -> Self {
        Self { base, on: true }
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl DeviceBehaviour for Temperature {
    fn update(&mut self, time: f64) -> Reading {
        if !self.on {
            return Reading::new().with("status", "OFF").with("on", false);
        }
        let temp = self.base + (time * 0.1).sin() * 0.5;
        let humidity = 45.0 + (time * 0.1).cos() * 2.0;
        Reading::new()
            .with("temp", tenths(temp))
            .with("humidity", humidity.round())
            .with("status", "Active")
            .with("on", true)
    }

    fn toggle(&mut self) -> Option<bool> {
        self.on = !self.on;
        Some(self.on)
    }
}

/// Relative humidity oscillating around 50 %.
pub struct Humidity;

impl DeviceBehaviour for Humidity {
    fn update(&mut self, time: f64) -> Reading {
        Reading::new().with("humidity", (50.0 + (time * 0.2).sin() * 5.0).round())
    }
}

/// Barometric pressure around 1013 hPa.
pub struct Pressure;

impl DeviceBehaviour for Pressure {
    fn update(&mut self, time: f64) -> Reading {
        Reading::new()
            .with("pressure", (1013.0 + time.sin() * 2.0).round())
            .with("unit", "hPa")
    }
}

/// CO2 concentration between 420 and 430 ppm.
pub struct AirQuality {
    rng: StdRng,
}

impl AirQuality {
    #[must_use]
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl DeviceBehaviour for AirQuality {
    fn update(&mut self, _time: f64) -> Reading {
        let co2: f64 = 420.0 + self.rng.gen_range(0.0..10.0);
        Reading::new().with("co2", co2.round()).with("aqi", "Good")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use roomlink_domain::reading::ReadingValue;

    fn float(reading: &Reading, key: &str) -> f64 {
        match reading.get(key) {
            Some(ReadingValue::Float(value)) => *value,
            other => panic!("{key} is not a float: {other:?}"),
        }
    }

    #[test]
    fn should_draw_base_between_21_and_23() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let sensor = Temperature::new(&mut rng);
            assert!((21.0..23.0).contains(&sensor.base));
        }
    }

    #[test]
    fn should_report_base_temperature_at_time_zero() {
        let mut sensor = Temperature::with_base(22.0);
        let reading = sensor.update(0.0);
        assert!((float(&reading, "temp") - 22.0).abs() < f64::EPSILON);
        assert!((float(&reading, "humidity") - 47.0).abs() < f64::EPSILON);
        assert_eq!(reading.get("on"), Some(&ReadingValue::Bool(true)));
    }

    #[test]
    fn should_stay_within_half_a_degree_of_base() {
        let mut sensor = Temperature::with_base(21.5);
        for t in 0..200 {
            let temp = float(&sensor.update(f64::from(t)), "temp");
            assert!((21.0..=22.0).contains(&temp), "{temp}");
        }
    }

    #[test]
    fn should_blank_readings_when_toggled_off() {
        let mut sensor = Temperature::with_base(22.0);
        assert_eq!(sensor.toggle(), Some(false));
        let reading = sensor.update(1.0);
        assert!(reading.get("temp").is_none());
        assert_eq!(reading.get("status"), Some(&ReadingValue::from("OFF")));

        assert_eq!(sensor.toggle(), Some(true));
        assert!(sensor.update(1.0).get("temp").is_some());
    }

    #[test]
    fn should_oscillate_humidity_between_45_and_55() {
        let mut sensor = Humidity;
        for t in 0..100 {
            let value = float(&sensor.update(f64::from(t)), "humidity");
            assert!((45.0..=55.0).contains(&value));
        }
    }

    #[test]
    fn should_report_pressure_in_hpa() {
        let reading = Pressure.update(0.0);
        assert!((float(&reading, "pressure") - 1013.0).abs() < f64::EPSILON);
        assert_eq!(reading.get("unit"), Some(&ReadingValue::from("hPa")));
    }

    #[test]
    fn should_keep_co2_between_420_and_430() {
        let mut sensor = AirQuality::new(StdRng::seed_from_u64(9));
        for t in 0..100 {
            let co2 = float(&sensor.update(f64::from(t)), "co2");
            assert!((420.0..=430.0).contains(&co2));
        }
    }
}
