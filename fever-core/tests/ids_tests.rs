use fever_core::ids::{parse_ids, IdList};
use fever_core::FeedsGroup;

#[test]
fn comma_joined_string_parses() {
    let ids = parse_ids(IdList::Joined("1,2,3".into())).unwrap();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn empty_string_is_an_empty_list() {
    let ids = parse_ids(IdList::Joined(String::new())).unwrap();
    assert!(ids.is_empty());
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let ids = parse_ids(IdList::Joined(" 7 , 8".into())).unwrap();
    assert_eq!(ids, vec![7, 8]);
}

#[test]
fn integer_sequences_pass_through() {
    let ids = parse_ids(IdList::Ints(vec![4, 5])).unwrap();
    assert_eq!(ids, vec![4, 5]);
}

#[test]
fn string_sequences_are_coerced() {
    let ids = parse_ids(IdList::Strings(vec!["4".into(), "5".into()])).unwrap();
    assert_eq!(ids, vec![4, 5]);
}

#[test]
fn non_numeric_input_is_rejected() {
    assert!(parse_ids(IdList::Joined("1,x,3".into())).is_err());
    assert!(parse_ids(IdList::Strings(vec!["nope".into()])).is_err());
}

#[test]
fn deserializer_adapter_handles_every_wire_form() {
    let joined: FeedsGroup =
        serde_json::from_str(r#"{"group_id": 1, "feed_ids": "4,5"}"#).unwrap();
    assert_eq!(joined.feed_ids, vec![4, 5]);

    let ints: FeedsGroup = serde_json::from_str(r#"{"group_id": 1, "feed_ids": [4, 5]}"#).unwrap();
    assert_eq!(ints.feed_ids, vec![4, 5]);

    let strings: FeedsGroup =
        serde_json::from_str(r#"{"group_id": 1, "feed_ids": ["4", "5"]}"#).unwrap();
    assert_eq!(strings.feed_ids, vec![4, 5]);
}
