//! Automation inference: plausible trigger → actuator pairs by proximity.
//!
//! No occlusion is applied: this is a planning hint, not a radio link.

use roomlink_domain::connection::ConnectionResult;
use roomlink_domain::device::Device;
use roomlink_domain::role::classify;

/// Labels (subtype, else type) of devices that start automations.
pub const TRIGGER_LABELS: [&str; 5] = ["motion", "door", "switch", "leak", "button"];

/// Labels (subtype, else type) of devices that automations drive.
pub const ACTUATOR_LABELS: [&str; 5] = ["light", "socket", "relay", "bulb", "plug"];

fn has_label(device: &Device, labels: &[&str]) -> bool {
    let label = device.label();
    labels.iter().any(|l| l.eq_ignore_ascii_case(label))
}

/// One logic link per trigger towards its nearest actuator strictly within
/// `radius` metres.
///
/// Hubs and routers never take part. An actuator may be driven by several
/// triggers. Ties go to the first actuator in input order.
#[must_use]
pub fn infer_links(devices: &[Device], radius: f64) -> Vec<ConnectionResult> {
    let eligible: Vec<&Device> = devices
        .iter()
        .filter(|d| !classify(d).is_controller())
        .collect();
    let actuators: Vec<&Device> = eligible
        .iter()
        .copied()
        .filter(|d| has_label(d, &ACTUATOR_LABELS))
        .collect();

    eligible
        .iter()
        .copied()
        .filter(|d| has_label(d, &TRIGGER_LABELS))
        .filter_map(|trigger| {
            let mut nearest = None;
            let mut min_distance = radius;
            for actuator in &actuators {
                let distance = trigger.position.distance_to(actuator.position);
                if distance < min_distance {
                    min_distance = distance;
                    nearest = Some(*actuator);
                }
            }
            nearest.map(|actuator| ConnectionResult::logic(trigger, actuator))
        })
        .collect()
}
