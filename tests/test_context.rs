use dirty_validators::Context;
use serde_json::json;

fn tree_a() -> serde_json::Value {
    json!({
        "fieldName1": "aaa",
        "fieldList1": [
            {"fieldName1": "value_A_0_1", "fieldName2": "value_A_0_2"},
            {"fieldName1": "value_A_1_1", "fieldName2": "value_A_1_2"}
        ]
    })
}

fn tree_b() -> serde_json::Value {
    json!({
        "fieldName1": "bbb",
        "fieldList1": [
            {"fieldName1": "value_B_0_1", "fieldName2": "value_B_0_2"},
            {"fieldName1": "value_B_1_1", "fieldName2": "value_B_1_2"}
        ]
    })
}

#[test]
fn test_get_field_from_current_step() {
    let root = Context::new(json!({"fieldname1": "asa"}));
    let ctx = root.child(json!({"fieldname1": "bbb"}), true);
    assert_eq!(ctx.get_field_value("fieldname1"), Some(json!("bbb")));
}

#[test]
fn test_get_field_from_parent_step() {
    let root = Context::new(json!({"fieldname1": "asa"}));
    let ctx = root.child(json!({"fieldname1": "bbb"}), true);
    assert_eq!(ctx.get_field_value("<context>.fieldname1"), Some(json!("asa")));
}

#[test]
fn test_non_step_delegates_to_parent_step() {
    let root = Context::new(json!({"fieldname1": "asa"}));
    let ctx = root.child(json!({"fieldname1": "bbb"}), false);
    assert_eq!(ctx.get_field_value("fieldname1"), Some(json!("asa")));
}

#[test]
fn test_climb_past_root_yields_nothing() {
    let root = Context::new(json!({"fieldname1": "asa"}));
    let ctx = root.child(json!({"fieldname1": "bbb"}), true);
    assert_eq!(ctx.get_field_value("<context>.<context>.fieldname1"), None);
}

#[test]
fn test_non_step_climb_past_root_yields_nothing() {
    let root = Context::new(json!({"fieldname1": "asa"}));
    let ctx = root.child(json!({"fieldname1": "bbb"}), false);
    assert_eq!(ctx.get_field_value("<context>.fieldname1"), None);
}

#[test]
fn test_get_embedded_field() {
    let root = Context::new(json!({"fieldname2": {"fieldname3": "fuii"}}));
    let ctx = root.child(json!({"fieldname2": {"fieldname3": "oouch"}}), true);
    assert_eq!(ctx.get_field_value("fieldname2.fieldname3"), Some(json!("oouch")));
    assert_eq!(
        ctx.get_field_value("<context>.fieldname2.fieldname3"),
        Some(json!("fuii"))
    );
}

#[test]
fn test_get_embedded_field_missing() {
    let root = Context::new(json!({"fieldname1": "asa"}));
    let ctx = root.child(json!({"fieldname1": "bbb"}), false);
    assert_eq!(ctx.get_field_value("fieldname2.fieldname3"), None);
}

#[test]
fn test_get_array_element() {
    let root = Context::new(json!({"fieldname2": ["asase", "fuii"]}));
    let ctx = root.child(json!({"fieldname2": ["asase11", "fuii11"]}), true);
    assert_eq!(ctx.get_field_value("fieldname2.1"), Some(json!("fuii11")));
    assert_eq!(
        ctx.get_field_value("<context>.fieldname2.1"),
        Some(json!("fuii"))
    );
}

#[test]
fn test_get_array_element_out_of_bounds() {
    let ctx = Context::new(json!({"fieldname2": ["asase11", "fuii11"]}));
    assert_eq!(ctx.get_field_value("fieldname2.3"), None);
    assert_eq!(ctx.get_field_value("fieldname2.3.qwq"), None);
}

#[test]
fn test_get_scalar_subfield_yields_nothing() {
    let ctx = Context::new(json!({"fieldname2": ["asase11", "fuii11"]}));
    assert_eq!(ctx.get_field_value("fieldname2.0.qwq"), None);
}

#[test]
fn test_get_numeric_object_key() {
    let root = Context::new(json!({"fieldname2": {"1": "asase", "2": "fuii"}}));
    let ctx = root.child(json!({"fieldname2": {"1": "asase11", "2": "fuii11"}}), true);
    assert_eq!(ctx.get_field_value("fieldname2.1"), Some(json!("asase11")));
    assert_eq!(
        ctx.get_field_value("<context>.fieldname2.1"),
        Some(json!("asase"))
    );
}

#[test]
fn test_get_nested_path_through_array() {
    let root = Context::new(tree_a());
    let ctx = root.child(tree_b(), true);
    assert_eq!(
        ctx.get_field_value("fieldList1.1.fieldName2"),
        Some(json!("value_B_1_2"))
    );
    assert_eq!(
        ctx.get_field_value("<context>.fieldList1.1.fieldName2"),
        Some(json!("value_A_1_2"))
    );
    assert_eq!(ctx.get_field_value("<context>.fieldList1.3.fieldName2"), None);
}

#[test]
fn test_root_lookup() {
    let root = Context::new(tree_a());
    let ctx = root.child(tree_b(), true);
    assert_eq!(
        ctx.get_field_value("<root>.fieldList1.1.fieldName2"),
        Some(json!("value_A_1_2"))
    );
    assert_eq!(ctx.get_field_value("<root>.fieldList1.3.fieldName2"), None);
}

fn check_step(ctx: &Context<'_>, depth: u64) {
    let step = ctx.child(json!({ "fieldName": depth }), true);
    let leaf = step.child(json!({"fieldName": "a"}), false);
    if depth == 9 {
        assert_eq!(leaf.get_field_value("<root>.fieldName"), Some(json!(0)));
        assert_eq!(leaf.get_field_value("fieldName"), Some(json!(9)));
        assert_eq!(leaf.get_field_value("<context>.fieldName"), Some(json!(8)));
        assert_eq!(
            leaf.get_field_value("<context>.<context>.fieldName"),
            Some(json!(7))
        );
    } else {
        check_step(&leaf, depth + 1);
    }
}

#[test]
fn test_multi_steps() {
    let root = Context::new(json!({"fieldName": 0}));
    let leaf = root.child(json!({"fieldName": "a"}), false);
    check_step(&leaf, 1);
}
