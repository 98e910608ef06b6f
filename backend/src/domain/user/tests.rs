//! Tests for the user data model.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("1", 1)]
#[case("42", 42)]
#[case("0", 0)]
#[case("-1", -1)]
fn parses_integer_ids(#[case] raw: &str, #[case] expected: i64) {
    let id: UserId = raw.parse().expect("valid id");
    assert_eq!(id.get(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn rejects_blank_ids(#[case] raw: &str) {
    assert_eq!(raw.parse::<UserId>(), Err(UserIdParseError::Empty));
}

#[rstest]
#[case("abc")]
#[case("1.5")]
#[case("9223372036854775808")]
#[case(" 7")]
fn rejects_non_integer_ids(#[case] raw: &str) {
    let error = raw.parse::<UserId>().expect_err("invalid id");
    assert!(matches!(error, UserIdParseError::NotAnInteger { value } if value == raw));
}

#[rstest]
fn next_advances_until_exhausted() {
    assert_eq!(UserId::FIRST.next(), Some(UserId::new(2)));
    assert_eq!(UserId::new(i64::MAX).next(), None);
}

#[rstest]
fn new_user_discards_inbound_id() {
    let draft: NewUser =
        serde_json::from_value(json!({ "id": 17, "name": "Alice" })).expect("valid payload");

    assert_eq!(draft.attributes().len(), 1);
    assert_eq!(draft.attributes().get("name"), Some(&json!("Alice")));
}

#[rstest]
#[case(json!({ "name": "Alice" }))]
#[case(json!({ "id": null, "name": "Alice" }))]
#[case(json!({ "id": 0, "name": "Alice" }))]
#[case(json!({ "id": -5, "name": "Alice" }))]
fn new_user_accepts_any_integer_or_null_id(#[case] payload: serde_json::Value) {
    let draft: NewUser = serde_json::from_value(payload).expect("valid payload");
    assert_eq!(draft, NewUser::default().with_attribute("name", "Alice"));
}

#[rstest]
#[case(json!({ "id": "seven", "name": "Alice" }))]
#[case(json!({ "id": 1.5 }))]
#[case(json!(["Alice"]))]
#[case(json!("Alice"))]
fn new_user_rejects_malformed_structure(#[case] payload: serde_json::Value) {
    assert!(serde_json::from_value::<NewUser>(payload).is_err());
}

#[rstest]
fn with_attribute_ignores_reserved_id_key() {
    let draft = NewUser::default()
        .with_attribute("id", 5)
        .with_attribute("name", "Bob");
    assert!(draft.attributes().get("id").is_none());
}

#[rstest]
fn user_serialises_id_alongside_attributes() {
    let user = User::new(UserId::FIRST, NewUser::default().with_attribute("name", "Alice"));

    let body = serde_json::to_string(&user).expect("user serialises");
    assert_eq!(body, r#"{"id":1,"name":"Alice"}"#);
}

#[rstest]
fn user_round_trips_nested_attributes() {
    let payload = json!({
        "id": 3,
        "name": "Carol",
        "contact": { "email": "carol@example.com", "phones": ["555-0100"] },
    });

    let user: User = serde_json::from_value(payload.clone()).expect("user parses");
    assert_eq!(user.id(), UserId::new(3));
    assert_eq!(
        user.attribute("contact").and_then(|c| c.get("email")),
        Some(&json!("carol@example.com"))
    );
    assert_eq!(serde_json::to_value(&user).expect("user serialises"), payload);
}

#[rstest]
fn into_draft_drops_identifier() {
    let user = User::new(UserId::new(8), NewUser::default().with_attribute("name", "Dan"));
    let draft = user.clone().into_draft();
    assert_eq!(User::new(UserId::new(8), draft), user);
}
