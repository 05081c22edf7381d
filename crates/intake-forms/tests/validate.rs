use std::collections::BTreeMap;

use intake_core::models::ItemId;
use intake_core::validation::{ValidationRules, ViolationKind};
use intake_forms::{FieldItem, FieldType, FieldValue, validate_field, validate_submission};
use intake_schema::SchemaItem;

fn field(field_type: FieldType) -> FieldItem {
    FieldItem::create(ItemId::new(), field_type)
}

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

fn kinds(field: &FieldItem, value: Option<&FieldValue>) -> Vec<ViolationKind> {
    validate_field(field, value)
        .into_iter()
        .map(|v| v.kind)
        .collect()
}

#[test]
fn required_field_without_value_fails() {
    let mut item = field(FieldType::Text);
    item.required = true;
    assert_eq!(kinds(&item, None), vec![ViolationKind::Required]);
    assert_eq!(kinds(&item, Some(&text("   "))), vec![ViolationKind::Required]);
    assert!(kinds(&item, Some(&text("ok"))).is_empty());
}

#[test]
fn optional_blank_value_skips_other_checks() {
    let mut item = field(FieldType::Text);
    item.validation = Some(ValidationRules {
        min_length: Some(5),
        ..Default::default()
    });
    assert!(kinds(&item, Some(&text(""))).is_empty());
}

#[test]
fn required_switch_accepts_explicit_false() {
    let mut item = field(FieldType::Switch);
    item.required = true;
    assert_eq!(kinds(&item, None), vec![ViolationKind::Required]);
    assert!(kinds(&item, Some(&FieldValue::Flag(false))).is_empty());
}

#[test]
fn number_bounds_come_from_validation() {
    let item = field(FieldType::Number);
    assert!(kinds(&item, Some(&FieldValue::Number(0.0))).is_empty());
    assert_eq!(
        kinds(&item, Some(&FieldValue::Number(-1.0))),
        vec![ViolationKind::BelowMin { min: 0.0 }]
    );
    assert!(kinds(&item, Some(&text("42"))).is_empty());
    assert_eq!(kinds(&item, Some(&text("lots"))), vec![ViolationKind::NotANumber]);
}

#[test]
fn stale_text_rules_are_ignored_for_numbers() {
    let mut item = field(FieldType::Number);
    item.validation = Some(ValidationRules {
        min_length: Some(10),
        pattern: Some("x+".to_string()),
        ..Default::default()
    });
    assert!(kinds(&item, Some(&FieldValue::Number(3.0))).is_empty());
}

#[test]
fn text_rules_apply_to_text_like_fields() {
    let mut item = field(FieldType::Textarea);
    item.validation = Some(ValidationRules {
        max_length: Some(4),
        ..Default::default()
    });
    assert_eq!(
        kinds(&item, Some(&text("too long"))),
        vec![ViolationKind::TooLong { max: 4 }]
    );
}

#[test]
fn format_checks() {
    let email = field(FieldType::Email);
    assert!(kinds(&email, Some(&text("pi@site.org"))).is_empty());
    assert!(matches!(
        kinds(&email, Some(&text("pi-at-site")))[..],
        [ViolationKind::InvalidFormat { .. }]
    ));

    let tel = field(FieldType::Tel);
    assert!(kinds(&tel, Some(&text("+44 (0)20 7946 0000"))).is_empty());
    assert!(!kinds(&tel, Some(&text("call me"))).is_empty());

    let url = field(FieldType::Url);
    assert!(kinds(&url, Some(&text("https://trials.example.org/site/4"))).is_empty());
    assert!(!kinds(&url, Some(&text("trials.example.org"))).is_empty());

    let date = field(FieldType::Date);
    assert!(kinds(&date, Some(&text("2024-02-29"))).is_empty());
    assert!(!kinds(&date, Some(&text("2023-02-29"))).is_empty());
}

#[test]
fn choices_must_come_from_options() {
    let select = field(FieldType::Select);
    assert!(kinds(&select, Some(&text("Option 2"))).is_empty());
    assert_eq!(
        kinds(&select, Some(&text("Option 9"))),
        vec![ViolationKind::NotAnOption {
            value: "Option 9".to_string()
        }]
    );
    assert_eq!(
        kinds(
            &select,
            Some(&FieldValue::List(vec!["Option 1".to_string()]))
        ),
        vec![ViolationKind::SingleChoiceOnly]
    );

    let group = field(FieldType::CheckboxGroup);
    let picks = FieldValue::List(vec!["Option 1".to_string(), "Option 4".to_string()]);
    assert_eq!(kinds(&group, Some(&picks)).len(), 1);
}

#[test]
fn mismatched_value_kind_is_reported() {
    let item = field(FieldType::Checkbox);
    assert_eq!(kinds(&item, Some(&text("yes"))), vec![ViolationKind::WrongValueKind]);
}

#[test]
fn submission_reports_in_field_order() {
    let mut name = field(FieldType::Text);
    name.required = true;
    let mut age = field(FieldType::Number);
    age.required = true;

    let mut values = BTreeMap::new();
    values.insert(age.id, FieldValue::Number(-3.0));

    let violations = validate_submission(&[name.clone(), age.clone()], &values);
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].item_id, name.id);
    assert_eq!(violations[1].item_id, age.id);
}

#[test]
fn values_parse_from_json() {
    let values: Vec<FieldValue> =
        serde_json::from_str(r#"[true, 4, "text", ["a", "b"]]"#).unwrap();
    assert_eq!(
        values,
        vec![
            FieldValue::Flag(true),
            FieldValue::Number(4.0),
            text("text"),
            FieldValue::List(vec!["a".to_string(), "b".to_string()]),
        ]
    );
}
