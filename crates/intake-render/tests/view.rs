use intake_forms::{FieldType, FormDefinition};
use intake_quiz::{QuestionType, QuizDefinition};
use intake_render::{RenderMode, render_form, render_quiz};
use intake_schema::ItemType;
use jiff::civil::date;

fn form() -> FormDefinition {
    let mut form = FormDefinition::new("Intake");
    form.fields.add_item(FieldType::Select).unwrap();
    form.fields.add_item(FieldType::Text).unwrap();
    form.fields.add_item(FieldType::RadioGroup).unwrap();
    form
}

#[test]
fn authoring_canvas_offers_structural_controls() {
    let form = form();
    let view = render_form(&form, RenderMode::AuthoringDisabled);
    assert_eq!(view.controls.len(), 3);

    let first = view.controls[0].structural.as_ref().unwrap();
    assert!(!first.can_move_up);
    assert!(first.can_move_down);
    assert!(first.can_edit_options);
    assert!(first.can_remove_option);
    assert_eq!(first.retype_targets.len(), FieldType::ALL.len() - 1);
    assert!(!first.retype_targets.contains(&"select".to_string()));

    let middle = view.controls[1].structural.as_ref().unwrap();
    assert!(middle.can_move_up && middle.can_move_down);
    assert!(!middle.can_edit_options);
    assert!(!middle.can_remove_option);

    let last = view.controls[2].structural.as_ref().unwrap();
    assert!(last.can_move_up);
    assert!(!last.can_move_down);
}

#[test]
fn single_option_cannot_be_removed() {
    let mut form = form();
    let id = form.fields.items()[0].id;
    form.fields.remove_option(id, 2).unwrap();
    form.fields.remove_option(id, 1).unwrap();

    let view = render_form(&form, RenderMode::AuthoringDisabled);
    let structural = view.controls[0].structural.as_ref().unwrap();
    assert!(structural.can_edit_options);
    assert!(!structural.can_remove_option);
}

#[test]
fn preview_and_read_only_modes_have_no_structural_controls() {
    let form = form();
    for mode in [RenderMode::PreviewEnabled, RenderMode::ReadOnly] {
        let view = render_form(&form, mode);
        assert!(view.controls.iter().all(|c| c.structural.is_none()));
    }
}

#[test]
fn read_only_schema_has_no_structural_controls() {
    let mut form = form();
    form.fields.set_read_only(true);
    let view = render_form(&form, RenderMode::AuthoringDisabled);
    assert!(view.read_only);
    assert!(view.controls.iter().all(|c| c.structural.is_none()));
}

#[test]
fn rendering_never_mutates() {
    let form = form();
    let version = form.fields.version();
    let before = form.clone();
    let _ = render_form(&form, RenderMode::AuthoringDisabled);
    assert_eq!(form, before);
    assert_eq!(form.fields.version(), version);
}

#[test]
fn quiz_view_uses_question_text() {
    let mut quiz = QuizDefinition::new("Pain diary", "STUDY-1", date(2025, 1, 1));
    quiz.questions.add_item(QuestionType::Scale).unwrap();
    let view = render_quiz(&quiz, RenderMode::PreviewEnabled);
    assert_eq!(view.title, "Pain diary");
    assert_eq!(view.description, None);
    assert_eq!(view.controls[0].label, "New question");
    assert!(view.controls[0].interactive);
}

#[test]
fn read_only_schema_forces_read_only_mode() {
    let mut form = form();
    form.fields.set_read_only(true);
    let view = render_form(&form, RenderMode::PreviewEnabled);
    assert_eq!(view.mode, RenderMode::ReadOnly);
    assert!(view.controls.iter().all(|c| !c.interactive));

    let mut quiz = QuizDefinition::new("Pain diary", "STUDY-1", date(2025, 1, 1));
    quiz.questions.add_item(QuestionType::Scale).unwrap();
    quiz.questions.set_read_only(true);
    let view = render_quiz(&quiz, RenderMode::PreviewEnabled);
    assert_eq!(view.mode, RenderMode::ReadOnly);
    assert!(!view.controls[0].interactive);
}
