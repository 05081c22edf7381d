use intake_core::config::EngineConfig;
use intake_core::outcome::{NoOpReason, Outcome};
use intake_forms::{FieldPatch, FieldType, FormDefinition, FormError, FormIssue};
use intake_schema::{Direction, SchemaItem};

#[test]
fn select_lifecycle_scenario() {
    let mut form = FormDefinition::new("Screening");
    let id = form.fields.add_item(FieldType::Select).unwrap();

    let field = form.fields.get(id).unwrap();
    assert_eq!(
        field.options().unwrap().as_slice(),
        ["Option 1", "Option 2", "Option 3"]
    );
    assert!(!field.required);

    assert_eq!(form.fields.remove_option(id, 2), Ok(Outcome::Applied));
    assert_eq!(form.fields.remove_option(id, 1), Ok(Outcome::Applied));
    assert_eq!(
        form.fields.remove_option(id, 2),
        Ok(Outcome::NoOp(NoOpReason::LastOption))
    );
    assert_eq!(form.fields.get(id).unwrap().options().unwrap().len(), 1);

    assert_eq!(form.fields.retype_item(id, FieldType::Switch), Ok(Outcome::Applied));
    assert!(form.fields.get(id).unwrap().options().is_none());
}

#[test]
fn move_round_trip_scenario() {
    let mut form = FormDefinition::new("Visit");
    let a = form.fields.add_item(FieldType::Text).unwrap();
    let b = form.fields.add_item(FieldType::Date).unwrap();
    let c = form.fields.add_item(FieldType::Number).unwrap();

    form.fields.move_item(b, Direction::Up).unwrap();
    let order: Vec<_> = form.fields.iter().map(|f| f.id).collect();
    assert_eq!(order, vec![b, a, c]);

    // Moving the same item back down is the inverse swap.
    form.fields.move_item(b, Direction::Down).unwrap();
    let order: Vec<_> = form.fields.iter().map(|f| f.id).collect();
    assert_eq!(order, vec![a, b, c]);

    form.fields.move_item(a, Direction::Down).unwrap();
    let order: Vec<_> = form.fields.iter().map(|f| f.id).collect();
    assert_eq!(order, vec![b, a, c]);
}

#[test]
fn duplicate_keeps_values_under_new_identity() {
    let mut form = FormDefinition::new("Intake");
    let id = form.fields.add_item(FieldType::RadioGroup).unwrap();
    form.fields
        .update_item(
            id,
            FieldPatch {
                label: Some("Sex at birth".to_string()),
                required: Some(true),
                ..Default::default()
            },
        )
        .unwrap();
    form.fields.add_item(FieldType::Text).unwrap();
    let original = form.fields.get(id).unwrap().clone();

    let copy_id = form.fields.duplicate_item(id).unwrap();
    let copy = form.fields.get(copy_id).unwrap();
    assert_eq!(form.fields.position(copy_id), Some(2));
    assert_eq!(copy.label, "Sex at birth (Copy)");
    assert_eq!(copy.shape, original.shape);
    assert!(copy.required);
    assert_eq!(form.fields.get(id).unwrap(), &original);
}

#[test]
fn configure_applies_purge_policy() {
    let mut form = FormDefinition::new("Labs");
    form.configure(&EngineConfig {
        purge_stale_validation: true,
        ..EngineConfig::default()
    });
    let id = form.fields.add_item(FieldType::Number).unwrap();
    form.fields.retype_item(id, FieldType::Text).unwrap();
    assert!(form.fields.get(id).unwrap().validation.is_none());
}

#[test]
fn blank_title_is_rejected() {
    let mut form = FormDefinition::new("Consent");
    assert!(form.set_title(" ").is_err());
    assert_eq!(form.title, "Consent");
}

#[test]
fn save_validates_before_calling_back() {
    let mut form = FormDefinition::new("");
    form.fields.add_item(FieldType::Text).unwrap();

    let mut called = false;
    let result = form.save(|_| {
        called = true;
        Ok::<_, FormError>(())
    });
    match result {
        Err(FormError::Invalid(issues)) => assert_eq!(issues, vec![FormIssue::MissingTitle]),
        other => panic!("expected invalid form, got {other:?}"),
    }
    assert!(!called);

    form.title = "Adverse events".to_string();
    let mut saved = None;
    form.save(|def| {
        saved = Some(serde_json::to_value(def).unwrap());
        Ok::<_, FormError>(())
    })
    .unwrap();
    let saved = saved.unwrap();
    assert_eq!(saved["title"], "Adverse events");
    assert_eq!(saved["fields"][0]["type"], "text");
}

#[test]
fn form_round_trips_through_json() {
    let mut form = FormDefinition::new("Follow-up");
    form.description = Some("Week 4".to_string());
    form.fields.add_item(FieldType::CheckboxGroup).unwrap();
    form.fields.add_item(FieldType::Number).unwrap();

    let json = serde_json::to_string(&form).unwrap();
    let back: FormDefinition = serde_json::from_str(&json).unwrap();
    assert_eq!(back, form);
    assert_eq!(serde_json::to_string(&back).unwrap(), json);
}
