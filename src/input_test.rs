#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

// --- Key ---

#[test]
fn enter_and_space_are_reset_activation() {
    assert!(Key("Enter".into()).is_reset_activation());
    assert!(Key(" ".into()).is_reset_activation());
    assert!(Key("Spacebar".into()).is_reset_activation());
}

#[test]
fn other_keys_are_not_reset_activation() {
    for k in ["Escape", "Delete", "a", "enter", "Tab", ""] {
        assert!(!Key(k.into()).is_reset_activation(), "{k:?}");
    }
}

// --- Gesture serde ---

#[test]
fn select_reagent_wire_shape() {
    let g: Gesture = serde_json::from_str(r#"{ "type": "select_reagent", "name": "HCl" }"#).unwrap();
    assert_eq!(g, Gesture::SelectReagent { name: "HCl".into() });
}

#[test]
fn drag_stop_wire_shape() {
    let id = Uuid::new_v4();
    let json = serde_json::json!({ "type": "drag_stop", "id": id, "x": 12.5, "y": 40.0 });
    let g: Gesture = serde_json::from_value(json).unwrap();
    assert_eq!(g, Gesture::DragStop { id, x: 12.5, y: 40.0 });
}

#[test]
fn unit_gestures_wire_shape() {
    let cases = [
        (r#"{ "type": "reset" }"#, Gesture::Reset),
        (r#"{ "type": "dismiss" }"#, Gesture::Dismiss),
        (r#"{ "type": "reset_and_clear" }"#, Gesture::ResetAndClear),
    ];
    for (input, expected) in cases {
        let g: Gesture = serde_json::from_str(input).unwrap();
        assert_eq!(g, expected);
    }
}

#[test]
fn key_down_wire_shape() {
    let g: Gesture = serde_json::from_str(r#"{ "type": "key_down", "key": "Enter" }"#).unwrap();
    assert_eq!(g, Gesture::KeyDown { key: Key("Enter".into()) });
}

#[test]
fn unknown_gesture_rejects() {
    assert!(serde_json::from_str::<Gesture>(r#"{ "type": "shake" }"#).is_err());
}
