use std::time::Duration;

use super::types::{clamp_position, volume_to_gain};

#[test]
fn volume_maps_linearly_to_gain() {
    assert_eq!(volume_to_gain(0), 0.0);
    assert_eq!(volume_to_gain(50), 0.5);
    assert_eq!(volume_to_gain(100), 1.0);
}

#[test]
fn out_of_range_volume_clamps_to_full_gain() {
    assert_eq!(volume_to_gain(150), 1.0);
}

#[test]
fn seek_targets_clamp_into_the_known_duration() {
    let total = Some(Duration::from_secs(30));
    assert_eq!(
        clamp_position(Duration::from_secs(12), total),
        Duration::from_secs(12)
    );
    assert_eq!(
        clamp_position(Duration::from_secs(45), total),
        Duration::from_secs(30)
    );
    // Unknown duration: trust the sink to cope with an overshoot.
    assert_eq!(
        clamp_position(Duration::from_secs(45), None),
        Duration::from_secs(45)
    );
}
