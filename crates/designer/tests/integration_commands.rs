//! Integration tests for the JSON command protocol.

use solar_designer_lib::command::{execute_json, execute_json_batch};
use solar_designer_lib::error::EditorError;
use solar_designer_lib::fixtures;

#[test]
fn test_batch_workflow() {
    let mut s = fixtures::roof_array_session();
    let script = r##"[
        {"command": "select", "ids": ["p1", "p4"]},
        {"command": "set_field", "field": "tilt_angle", "scope": "all_selected_objects_of_this_type", "id": "p1", "value": 0.4},
        {"command": "set_face_color", "scope": "only_this_side", "id": "c1", "side": 1, "color": "#AA0000"},
        {"command": "add_element", "element": {"id": "h1", "type": "human"}},
        {"command": "history"},
        {"command": "undo"},
        {"command": "undo"},
        {"command": "redo"}
    ]"##;

    let responses = execute_json_batch(&mut s, script).unwrap();
    assert_eq!(responses.len(), 8);
    assert!(responses.iter().all(|r| r.success));

    assert_eq!(responses[1].data.as_ref().unwrap()["changed"], true);
    let history = responses[4].data.as_ref().unwrap();
    assert_eq!(history["undo"].as_array().unwrap().len(), 3);
    assert_eq!(history["undo"][0], "Add Human");

    assert_eq!(s.get_element("p1").unwrap().tilt_angle, 0.4);
    assert_eq!(s.get_element("p4").unwrap().tilt_angle, 0.4);
    assert_eq!(s.get_element("p2").unwrap().tilt_angle, 0.0);
    assert_eq!(s.get_element("c1").unwrap().face_colors.as_ref().unwrap()[1], "#AA0000");
    assert!(s.get_element("h1").is_none());
    assert!(s.history().has_redo());
}

#[test]
fn test_noop_edit_reports_unchanged() {
    let mut s = fixtures::cuboids_session();
    let json = r##"{"command": "set_field", "field": "color", "scope": "all_objects_of_this_type_on_surface", "id": "c1", "value": "#808080"}"##;
    let resp = execute_json(&mut s, json).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["changed"], false);
    assert!(!s.can_undo());
}

#[test]
fn test_delete_and_export() {
    let mut s = fixtures::cuboids_session();
    let responses = execute_json_batch(
        &mut s,
        r#"[{"command": "delete_element", "id": "f1"}, {"command": "export_document"}]"#,
    )
    .unwrap();

    let removed = responses[0].data.as_ref().unwrap()["removed"].as_array().unwrap().len();
    assert_eq!(removed, 3);

    let json = responses[1].data.as_ref().unwrap()["document_json"].as_str().unwrap();
    let doc: shared::DesignDocument = serde_json::from_str(json).unwrap();
    let ids: Vec<_> = doc.elements.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["f2", "c3"]);
}

#[test]
fn test_locking_through_commands() {
    let mut s = fixtures::cuboids_session();
    let responses = execute_json_batch(
        &mut s,
        r##"[
            {"command": "set_locked", "id": "c2", "locked": true},
            {"command": "set_field", "field": "color", "scope": "all_objects_of_this_type", "id": "c1", "value": "#00FF00"},
            {"command": "set_field", "field": "color", "id": "c2", "value": "#00FF00"}
        ]"##,
    )
    .unwrap();

    assert_eq!(responses[1].data.as_ref().unwrap()["changed"], true);
    assert_eq!(responses[2].data.as_ref().unwrap()["changed"], false);
    assert_eq!(s.get_element("c1").unwrap().color, "#00FF00");
    assert_eq!(s.get_element("c2").unwrap().color, "#808080");
    assert_eq!(s.get_element("c3").unwrap().color, "#00FF00");
}

#[test]
fn test_invalid_json_is_an_error() {
    let mut s = fixtures::cuboids_session();
    let err = execute_json_batch(&mut s, r#"[{"command": "explode"}]"#).unwrap_err();
    assert!(matches!(err, EditorError::InvalidCommand(_)));
    assert!(err.to_string().contains("Invalid command JSON"));
}
