#![cfg(feature = "json")]
//! Tests for the run-time checked `serde_json::Value` operations.

use rstest::rstest;
use scollections::collection::{Map, Seq};
use scollections::error::CollectionError;
use scollections::maybe::Maybe;
use scollections::pick::field;
use serde_json::{Value, json};

#[rstest]
#[case(json!(true), "boolean")]
#[case(json!("text"), "string")]
#[case(json!({"a": 1}), "object")]
fn test_seq_from_json_rejects_non_arrays(#[case] value: Value, #[case] found: &str) {
    assert_eq!(
        Seq::from_json(value),
        Err(CollectionError::InvalidArgument {
            expected: "an array or null",
            found: found.to_string(),
        })
    );
}

#[rstest]
fn test_map_from_json_keeps_object_entries() {
    let map = Map::from_json(json!({"Civic": "Honda", "Levorg": "Subaru"})).unwrap();
    assert_eq!(map.get("Levorg").to_option(), Some(json!("Subaru")));
    assert_eq!(map.len(), 2);
    assert!(Map::from_json(Value::Null).unwrap().is_empty());
    assert!(matches!(
        Map::from_json(json!([1])),
        Err(CollectionError::InvalidArgument { .. })
    ));
}

#[rstest]
fn test_flat_map_json_requires_arrays() {
    let seq = Seq::from_json(json!([1, 2])).unwrap();
    let doubled = seq.flat_map_json(|value| json!([value, value])).unwrap();
    assert_eq!(doubled.to_json(), json!([1, 1, 2, 2]));
    assert_eq!(
        seq.flat_map_json(|value| value),
        Err(CollectionError::InvalidMapping {
            operation: "Seq::flatten_json",
            expected: "an array",
        })
    );
}

#[rstest]
fn test_map_json_round_trips_through_value() {
    let prices = Map::from_json(json!({"tea": 3, "cake": 5})).unwrap();
    let discounted = prices
        .map_json(|price, item| json!([item, price.as_i64().unwrap_or(0) - 1]))
        .unwrap();
    assert_eq!(discounted.to_json(), json!({"tea": 2, "cake": 4}));
}

#[rstest]
#[case(json!(null), Maybe::None)]
#[case(json!(0), Maybe::Some(json!(0)))]
#[case(json!(""), Maybe::Some(json!("")))]
fn test_maybe_from_json_only_maps_null(#[case] value: Value, #[case] expected: Maybe<Value>) {
    assert_eq!(Maybe::from_json(value), expected);
}

#[rstest]
fn test_maybe_flat_map_json_rejects_long_arrays() {
    let present = Maybe::from_json(json!(1));
    assert_eq!(
        present.flat_map_json(|value| json!([value, 2])),
        Err(CollectionError::TypeMismatch {
            expected: "null or an array of at most one element",
            found: "array".to_string(),
        })
    );
    assert_eq!(Maybe::<Value>::none().flat_map_json(|value| value), Ok(Maybe::None));
}

#[rstest]
fn test_sort_and_group_json_records_by_field() {
    let people = Seq::from_json(json!([
        {"name": "Carol", "team": "red"},
        {"name": "Alice", "team": "blue"},
        {"name": "Bob", "team": "red"}
    ]))
    .unwrap();

    let name = field::<Value, str>("name");
    let sorted = people.sort_by(move |person| name(person).map(|value| value.to_string()));
    assert_eq!(
        sorted.map(|person| person["name"].clone()).to_json(),
        json!(["Alice", "Bob", "Carol"])
    );

    let team = field::<Value, str>("team");
    let teams = people.group_by(move |person| team(person).and_then(|value| value.as_str().map(str::to_owned)));
    assert_eq!(
        teams.keys().to_vec(),
        vec![Some("red".to_string()), Some("blue".to_string())]
    );
    assert_eq!(teams.at(&Some("red".to_string())).map(|members| members.len()), Ok(2));

    let first = Maybe::some(people.at(0).unwrap());
    assert_eq!(first.pick("age"), Maybe::None);
    assert_eq!(first.pick("team"), Maybe::Some(json!("red")));
}
