use intake_core::models::options::Removal;
use intake_core::models::OptionList;

#[test]
fn numbered_seeds_placeholders_in_order() {
    let options = OptionList::numbered(3);
    assert_eq!(options.as_slice(), ["Option 1", "Option 2", "Option 3"]);
}

#[test]
fn numbered_zero_still_yields_one_option() {
    assert_eq!(OptionList::numbered(0).as_slice(), ["Option 1"]);
}

#[test]
fn empty_list_is_rejected() {
    assert!(OptionList::new(vec![]).is_err());
    assert!(serde_json::from_str::<OptionList>("[]").is_err());
}

#[test]
fn placeholder_uses_next_ordinal() {
    let mut options = OptionList::new(vec!["Yes".to_string(), "No".to_string()]).unwrap();
    let index = options.push_placeholder();
    assert_eq!(index, 2);
    assert_eq!(options.as_slice()[2], "Option 3");
}

#[test]
fn last_option_cannot_be_removed() {
    let mut options = OptionList::numbered(2);
    assert_eq!(options.remove(0), Removal::Removed("Option 1".to_string()));
    assert_eq!(options.remove(0), Removal::LastOption);
    assert_eq!(options.as_slice(), ["Option 2"]);
}

#[test]
fn out_of_range_removal_reports_length() {
    let mut options = OptionList::numbered(2);
    assert_eq!(options.remove(5), Removal::OutOfRange { len: 2 });
    assert_eq!(options.len(), 2);
}

#[test]
fn set_replaces_in_place() {
    let mut options = OptionList::numbered(2);
    assert_eq!(options.set(1, "Never".to_string()), Some("Option 2".to_string()));
    assert_eq!(options.set(2, "Always".to_string()), None);
    assert_eq!(options.as_slice(), ["Option 1", "Never"]);
}

#[test]
fn serializes_as_plain_array() {
    let options = OptionList::numbered(2);
    let json = serde_json::to_string(&options).unwrap();
    assert_eq!(json, r#"["Option 1","Option 2"]"#);
    let back: OptionList = serde_json::from_str(&json).unwrap();
    assert_eq!(back, options);
}

#[test]
fn single_option_refuses_even_with_bad_index() {
    let mut options = OptionList::numbered(1);
    assert_eq!(options.remove(7), Removal::LastOption);
}
