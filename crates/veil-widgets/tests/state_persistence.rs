//! serde support for the plain data enums (feature `state-persistence`).

#![cfg(feature = "state-persistence")]

use veil_widgets::{CloseReason, DrawerPosition, DrawerSize, TransitionPhase};

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct DrawerSnapshot {
    phase: TransitionPhase,
    position: DrawerPosition,
    size: DrawerSize,
    last_close: Option<CloseReason>,
}

#[test]
fn drawer_snapshot_survives_json() {
    let snapshot = DrawerSnapshot {
        phase: TransitionPhase::Open,
        position: DrawerPosition::Left,
        size: DrawerSize::Custom("42rem".to_owned()),
        last_close: Some(CloseReason::EscapeKey),
    };
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"Left\""));
    assert!(json.contains("\"42rem\""));
    let restored: DrawerSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snapshot);
}

#[test]
fn unit_variants_serialize_by_name() {
    assert_eq!(
        serde_json::to_string(&TransitionPhase::Closing).unwrap(),
        "\"Closing\""
    );
    let size: DrawerSize = serde_json::from_str("\"Small\"").unwrap();
    assert_eq!(size.css_value(), "360px");
}
