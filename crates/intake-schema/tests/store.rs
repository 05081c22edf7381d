use std::fmt;

use intake_core::models::{ItemId, OptionList};
use intake_core::outcome::{NoOpReason, Outcome};
use intake_schema::{
    Direction, ItemType, Mutation, RetypePolicy, Schema, SchemaError, SchemaEvent, SchemaItem,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Kind {
    Note,
    Choice,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ItemType for Kind {
    const ALL: &'static [Self] = &[Kind::Note, Kind::Choice];

    fn as_str(self) -> &'static str {
        match self {
            Kind::Note => "note",
            Kind::Choice => "choice",
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            Kind::Note => "Note",
            Kind::Choice => "Choice",
        }
    }

    fn carries_options(self) -> bool {
        matches!(self, Kind::Choice)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Item {
    id: ItemId,
    kind: Kind,
    text: String,
    options: Option<OptionList>,
    #[serde(default)]
    option_edits: u32,
}

impl SchemaItem for Item {
    type Type = Kind;
    type Patch = String;

    fn create(id: ItemId, item_type: Kind) -> Self {
        Self {
            id,
            kind: item_type,
            text: format!("New {}", item_type.display_name()),
            options: item_type.carries_options().then(|| OptionList::numbered(3)),
            option_edits: 0,
        }
    }

    fn id(&self) -> ItemId {
        self.id
    }

    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }

    fn item_type(&self) -> Kind {
        self.kind
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn options(&self) -> Option<&OptionList> {
        self.options.as_ref()
    }

    fn options_mut(&mut self) -> Option<&mut OptionList> {
        self.options.as_mut()
    }

    fn retype(&mut self, to: Kind, _policy: RetypePolicy) {
        self.options = match (self.options.take(), to.carries_options()) {
            (Some(options), true) => Some(options),
            (None, true) => Some(OptionList::numbered(1)),
            (_, false) => None,
        };
        self.kind = to;
    }

    fn apply_patch(&mut self, patch: String) -> Result<bool, String> {
        if patch.trim().is_empty() {
            return Err("text must not be blank".to_string());
        }
        if patch == self.text {
            return Ok(false);
        }
        self.text = patch;
        Ok(true)
    }

    fn options_changed(&mut self) {
        self.option_edits += 1;
    }
}

fn order(schema: &Schema<Item>) -> Vec<ItemId> {
    schema.iter().map(|item| item.id()).collect()
}

#[test]
fn add_appends_with_defaults_and_emits_event() {
    let mut schema = Schema::<Item>::new();
    let note = schema.add_item(Kind::Note).unwrap();
    let choice = schema.add_item(Kind::Choice).unwrap();

    assert_eq!(order(&schema), vec![note, choice]);
    assert_eq!(schema.get(choice).unwrap().options().unwrap().len(), 3);
    assert_eq!(schema.version(), 2);

    let events = schema.drain_events();
    assert_eq!(
        events[0],
        SchemaEvent::ItemAdded {
            id: note,
            item_type: "note"
        }
    );
    assert!(schema.drain_events().is_empty());
}

#[test]
fn rejected_update_leaves_item_untouched() {
    let mut schema = Schema::<Item>::new();
    let id = schema.add_item(Kind::Note).unwrap();
    let before = schema.clone();

    let err = schema.update_item(id, "   ".to_string()).unwrap_err();
    assert!(matches!(err, SchemaError::Rejected { .. }));
    assert_eq!(schema, before);
    assert_eq!(schema.version(), before.version());
}

#[test]
fn unchanged_update_is_a_no_op() {
    let mut schema = Schema::<Item>::new();
    let id = schema.add_item(Kind::Note).unwrap();
    let outcome = schema.update_item(id, "New Note".to_string()).unwrap();
    assert_eq!(outcome, Outcome::NoOp(NoOpReason::EmptyPatch));
    assert_eq!(schema.version(), 1);
}

#[test]
fn unknown_id_is_reported() {
    let mut schema = Schema::<Item>::new();
    schema.add_item(Kind::Note).unwrap();
    let missing = ItemId::new();

    assert_eq!(
        schema.delete_item(missing),
        Err(SchemaError::ItemNotFound { id: missing })
    );
    assert!(matches!(
        schema.move_item(missing, Direction::Up),
        Err(SchemaError::ItemNotFound { .. })
    ));
    assert_eq!(schema.len(), 1);
}

#[test]
fn delete_is_a_plain_splice() {
    let mut schema = Schema::<Item>::new();
    let a = schema.add_item(Kind::Note).unwrap();
    let b = schema.add_item(Kind::Choice).unwrap();
    let c = schema.add_item(Kind::Note).unwrap();

    assert_eq!(schema.delete_item(b), Ok(Outcome::Applied));
    assert_eq!(order(&schema), vec![a, c]);
}

#[test]
fn duplicate_appends_copy_with_fresh_id() {
    let mut schema = Schema::<Item>::new();
    let a = schema.add_item(Kind::Choice).unwrap();
    schema.add_item(Kind::Note).unwrap();
    let original = schema.get(a).unwrap().clone();

    let copy_id = schema.duplicate_item(a).unwrap();
    assert_ne!(copy_id, a);
    assert_eq!(schema.position(copy_id), Some(2));

    let copy = schema.get(copy_id).unwrap();
    assert_eq!(copy.text, "New Choice (Copy)");
    assert_eq!(copy.options, original.options);
    assert_eq!(schema.get(a).unwrap(), &original);
}

#[test]
fn moves_swap_neighbours_and_stop_at_boundaries() {
    let mut schema = Schema::<Item>::new();
    let a = schema.add_item(Kind::Note).unwrap();
    let b = schema.add_item(Kind::Note).unwrap();
    let c = schema.add_item(Kind::Note).unwrap();

    assert_eq!(schema.move_item(b, Direction::Up), Ok(Outcome::Applied));
    assert_eq!(order(&schema), vec![b, a, c]);
    assert_eq!(schema.move_item(a, Direction::Down), Ok(Outcome::Applied));
    assert_eq!(order(&schema), vec![b, c, a]);

    let version = schema.version();
    assert_eq!(
        schema.move_item(b, Direction::Up),
        Ok(Outcome::NoOp(NoOpReason::AtBoundary))
    );
    assert_eq!(
        schema.move_item(a, Direction::Down),
        Ok(Outcome::NoOp(NoOpReason::AtBoundary))
    );
    assert_eq!(order(&schema), vec![b, c, a]);
    assert_eq!(schema.version(), version);
}

#[test]
fn retype_to_same_type_is_a_no_op() {
    let mut schema = Schema::<Item>::new();
    let id = schema.add_item(Kind::Choice).unwrap();
    assert_eq!(
        schema.retype_item(id, Kind::Choice),
        Ok(Outcome::NoOp(NoOpReason::SameType))
    );
    assert_eq!(schema.retype_item(id, Kind::Note), Ok(Outcome::Applied));
    assert!(schema.get(id).unwrap().options().is_none());
}

#[test]
fn option_operations_require_an_options_type() {
    let mut schema = Schema::<Item>::new();
    let id = schema.add_item(Kind::Note).unwrap();
    assert_eq!(
        schema.add_option(id),
        Err(SchemaError::NotOptionsBearing {
            id,
            item_type: "note".to_string()
        })
    );
}

#[test]
fn option_edits() {
    let mut schema = Schema::<Item>::new();
    let id = schema.add_item(Kind::Choice).unwrap();

    schema.add_option(id).unwrap();
    schema.set_option(id, 0, "Never").unwrap();
    assert_eq!(
        schema.get(id).unwrap().options().unwrap().as_slice(),
        ["Never", "Option 2", "Option 3", "Option 4"]
    );

    assert_eq!(
        schema.set_option(id, 9, "x"),
        Err(SchemaError::OptionIndexOutOfRange { id, index: 9, len: 4 })
    );
    assert_eq!(
        schema.remove_option(id, 4),
        Err(SchemaError::OptionIndexOutOfRange { id, index: 4, len: 4 })
    );

    for _ in 0..3 {
        assert_eq!(schema.remove_option(id, 0), Ok(Outcome::Applied));
    }
    let before = serde_json::to_string(&schema).unwrap();
    assert_eq!(
        schema.remove_option(id, 0),
        Ok(Outcome::NoOp(NoOpReason::LastOption))
    );
    assert_eq!(serde_json::to_string(&schema).unwrap(), before);
}

#[test]
fn read_only_schema_refuses_every_mutation() {
    let mut schema = Schema::<Item>::new();
    let id = schema.add_item(Kind::Choice).unwrap();
    schema.set_read_only(true);

    assert_eq!(schema.add_item(Kind::Note), Err(SchemaError::ReadOnly));
    assert_eq!(schema.delete_item(id), Err(SchemaError::ReadOnly));
    assert_eq!(schema.remove_option(id, 0), Err(SchemaError::ReadOnly));
    assert_eq!(schema.len(), 1);
}

#[test]
fn stale_version_is_detected() {
    let mut schema = Schema::<Item>::new();
    let seen = schema.version();
    schema.add_item(Kind::Note).unwrap();

    let err = schema
        .apply_at(seen, Mutation::Add { item_type: Kind::Choice })
        .unwrap_err();
    assert_eq!(err, SchemaError::StaleVersion { expected: 0, actual: 1 });

    let report = schema
        .apply_at(1, Mutation::Add { item_type: Kind::Choice })
        .unwrap();
    assert!(report.outcome.is_applied());
    assert!(report.created.is_some());
}

#[test]
fn mutations_parse_from_json() {
    let mut schema = Schema::<Item>::new();
    let id = schema.add_item(Kind::Choice).unwrap();

    let json = format!(
        r#"[{{"op":"set_option","id":"{id}","index":1,"value":"Often"}},
            {{"op":"retype","id":"{id}","type":"note"}},
            {{"op":"add","type":"choice"}}]"#
    );
    let mutations: Vec<Mutation<Item>> = serde_json::from_str(&json).unwrap();
    for mutation in mutations {
        schema.apply(mutation).unwrap();
    }
    assert_eq!(schema.len(), 2);
    assert!(schema.get(id).unwrap().options().is_none());
}

#[test]
fn duplicate_ids_are_rejected_on_load() {
    let id = ItemId::new();
    let items = vec![Item::create(id, Kind::Note), Item::create(id, Kind::Choice)];
    assert_eq!(
        Schema::from_items(items).unwrap_err(),
        SchemaError::DuplicateId { id }
    );

    let json = format!(
        r#"[{{"id":"{id}","kind":"note","text":"a","options":null}},
            {{"id":"{id}","kind":"note","text":"b","options":null}}]"#
    );
    assert!(serde_json::from_str::<Schema<Item>>(&json).is_err());
}

#[test]
fn save_hands_over_the_ordered_items() {
    let mut schema = Schema::<Item>::new();
    let a = schema.add_item(Kind::Note).unwrap();
    let b = schema.add_item(Kind::Note).unwrap();
    schema.move_item(b, Direction::Up).unwrap();

    let mut saved = Vec::new();
    schema
        .save(|items| {
            saved = items.iter().map(|item| item.id()).collect();
            Ok::<_, std::convert::Infallible>(())
        })
        .unwrap();
    assert_eq!(saved, vec![b, a]);

    let result: Result<(), &str> = schema.save(|_| Err("disk full"));
    assert_eq!(result, Err("disk full"));
}

#[test]
fn option_edits_notify_the_item() {
    let mut schema = Schema::<Item>::new();
    let id = schema.add_item(Kind::Choice).unwrap();

    schema.add_option(id).unwrap();
    assert_eq!(schema.get(id).unwrap().option_edits, 0);

    schema.set_option(id, 0, "Never").unwrap();
    schema.remove_option(id, 1).unwrap();
    assert_eq!(schema.get(id).unwrap().option_edits, 2);

    schema.remove_option(id, 9).unwrap_err();
    schema.remove_option(id, 0).unwrap();
    schema.remove_option(id, 0).unwrap();
    assert_eq!(
        schema.remove_option(id, 0).unwrap(),
        Outcome::NoOp(NoOpReason::LastOption)
    );
    assert_eq!(schema.get(id).unwrap().option_edits, 4);
}

#[test]
fn events_accumulate_until_drained() {
    let mut schema = Schema::<Item>::new();
    let id = schema.add_item(Kind::Note).unwrap();
    schema.update_item(id, "Renamed".to_string()).unwrap();
    assert_eq!(schema.pending_events(), 2);

    schema.move_item(id, Direction::Up).unwrap();
    assert_eq!(schema.pending_events(), 2);

    assert_eq!(schema.drain_events().len(), 2);
    assert_eq!(schema.pending_events(), 0);
    schema.delete_item(id).unwrap();
    assert_eq!(schema.pending_events(), 1);
}
