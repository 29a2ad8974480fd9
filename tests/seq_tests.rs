//! Integration tests for `Seq`.
//!
//! Every scenario runs against both an eager and a lazy sequence built from
//! the same elements; the two must be indistinguishable.

use rstest::rstest;
use scollections::collection::{Map, Seq};
use scollections::error::CollectionError;
use scollections::maybe::Maybe;
use std::collections::HashMap;

fn eager<T: Clone + 'static>(elements: Vec<T>) -> Seq<T> {
    Seq::from_vec(elements)
}

fn lazy<T: Clone + 'static>(elements: Vec<T>) -> Seq<T> {
    Seq::lazy(elements)
}

type Build<T> = fn(Vec<T>) -> Seq<T>;

// =============================================================================
// Reductions
// =============================================================================

#[rstest]
#[case::eager(eager as Build<i32>)]
#[case::lazy(lazy as Build<i32>)]
fn test_max_returns_greatest_element(#[case] build: Build<i32>) {
    assert_eq!(build(vec![1, 9, 2, 8, 3]).max(), Ok(9));
}

#[rstest]
#[case::eager(eager as Build<i32>)]
#[case::lazy(lazy as Build<i32>)]
fn test_max_of_empty_sequence_fails(#[case] build: Build<i32>) {
    assert_eq!(
        build(Vec::new()).max(),
        Err(CollectionError::EmptyCollection {
            operation: "Seq::max"
        })
    );
}

#[rstest]
fn test_max_by_keeps_first_of_equal_keys() {
    let words = Seq::from_items(["pear", "fig", "plum", "kiwi"]);
    assert_eq!(words.max_by(|word| word.len()), Ok("pear"));
    assert_eq!(words.min_by(|word| word.len()), Ok("fig"));
}

#[rstest]
#[case::eager(eager as Build<i32>)]
#[case::lazy(lazy as Build<i32>)]
fn test_fold_runs_in_source_order(#[case] build: Build<i32>) {
    let digits = build(vec![1, 2, 3]);
    assert_eq!(digits.fold(0, |accumulator, digit| accumulator * 10 + digit), 123);
}

#[rstest]
fn test_reduce_and_sum() {
    let numbers = Seq::from_items([4, 5, 6]);
    assert_eq!(numbers.reduce(|left, right| left * right), Ok(120));
    assert_eq!(numbers.sum(), 15);
    assert!(Seq::<i32>::empty().reduce(|left, right| left + right).is_err());
}

#[rstest]
#[case::eager(eager as Build<&'static str>)]
#[case::lazy(lazy as Build<&'static str>)]
fn test_index_of_and_contains(#[case] build: Build<&'static str>) {
    let words = build(vec!["a", "b", "c"]);
    assert_eq!(words.index_of(&"c"), Maybe::Some(2));
    assert_eq!(words.index_of(&"z"), Maybe::None);
    assert!(words.contains(&"b"));
}

#[rstest]
fn test_mk_string_and_display() {
    let numbers = Seq::from_items([1, 2, 3]);
    assert_eq!(numbers.mk_string("-"), "1-2-3");
    assert_eq!(numbers.to_string(), "Seq(1, 2, 3)");
}

// =============================================================================
// Transformations
// =============================================================================

#[rstest]
#[case::eager(eager as Build<&'static str>)]
#[case::lazy(lazy as Build<&'static str>)]
fn test_distinct_keeps_first_occurrence(#[case] build: Build<&'static str>) {
    let words = build(vec!["foo", "bar", "foo", "baz"]);
    assert_eq!(words.distinct().to_vec(), vec!["foo", "bar", "baz"]);
}

#[rstest]
fn test_distinct_by_projection() {
    let words = Seq::from_items(["apple", "avocado", "banana", "blueberry", "cherry"]);
    let by_initial = words.distinct_by(|word| word.chars().next());
    assert_eq!(by_initial.to_vec(), vec!["apple", "banana", "cherry"]);
}

#[rstest]
#[case::eager(eager as Build<i32>)]
#[case::lazy(lazy as Build<i32>)]
fn test_map_filter_flat_map(#[case] build: Build<i32>) {
    let numbers = build(vec![1, 2, 3, 4]);
    assert_eq!(numbers.map(|n| n * 10).to_vec(), vec![10, 20, 30, 40]);
    assert_eq!(numbers.filter(|n| n % 2 == 0).to_vec(), vec![2, 4]);
    assert_eq!(numbers.filter_not(|n| n % 2 == 0).to_vec(), vec![1, 3]);
    assert_eq!(
        numbers.flat_map(|n| vec![n; usize::try_from(n % 3).unwrap_or(0)]).to_vec(),
        vec![1, 2, 2, 4]
    );
}

#[rstest]
fn test_flatten_one_level() {
    let nested = Seq::from_items([vec![1, 2], vec![], vec![3]]);
    assert_eq!(nested.flatten().to_vec(), vec![1, 2, 3]);
}

#[rstest]
fn test_append_and_prepend() {
    let middle = Seq::from_items([2, 3]);
    let whole = middle
        .prepend_element(1)
        .append(vec![4, 5])
        .append_element(6)
        .prepend(Seq::from_items([-1, 0]));
    assert_eq!(whole.to_vec(), vec![-1, 0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(middle.to_vec(), vec![2, 3]);
}

#[rstest]
#[case::eager(eager as Build<i32>)]
#[case::lazy(lazy as Build<i32>)]
fn test_reverse_is_eager(#[case] build: Build<i32>) {
    let reversed = build(vec![1, 2, 3]).reverse();
    assert!(reversed.is_computed());
    assert_eq!(reversed.to_vec(), vec![3, 2, 1]);
}

#[rstest]
fn test_sort_by_is_stable() {
    let people = Seq::from_items([("Carol", 30), ("Alice", 25), ("Bob", 30), ("Dave", 25)]);
    let by_age = people.sort_by(|(_, age)| *age);
    assert_eq!(
        by_age.map(|(name, _)| name).to_vec(),
        vec!["Alice", "Dave", "Carol", "Bob"]
    );
}

#[rstest]
fn test_sort_by_field_on_records() {
    let people = Seq::from_items([
        HashMap::from([("name", "Carol")]),
        HashMap::from([("name", "Alice")]),
    ]);
    let names = people
        .sort_by_field("name")
        .map(|sorted| sorted.map(|person| person["name"]).to_vec());
    assert_eq!(names, Ok(vec!["Alice", "Carol"]));
}

#[rstest]
fn test_sort_by_field_reports_missing_key() {
    let rows = Seq::from_items([
        HashMap::from([("name", "Carol")]),
        HashMap::from([("title", "Dr")]),
    ]);
    assert_eq!(
        rows.sort_by_field("name"),
        Err(CollectionError::MissingKey {
            key: "\"name\"".to_string()
        })
    );
}

#[rstest]
fn test_partition() {
    let (even, odd) = Seq::lazy(1..=6).partition(|n| n % 2 == 0);
    assert_eq!(even.to_vec(), vec![2, 4, 6]);
    assert_eq!(odd.to_vec(), vec![1, 3, 5]);
}

// =============================================================================
// Slicing
// =============================================================================

#[rstest]
#[case::take_zero("take", 0, vec![])]
#[case::take_negative("take", -1, vec![1, 2, 3])]
#[case::take_some("take", 2, vec![1, 2])]
#[case::take_more("take", 9, vec![1, 2, 3])]
#[case::take_right_zero("take_right", 0, vec![])]
#[case::take_right_negative("take_right", -2, vec![])]
#[case::take_right_some("take_right", 2, vec![2, 3])]
#[case::drop_zero("drop", 0, vec![1, 2, 3])]
#[case::drop_negative("drop", -1, vec![1, 2, 3])]
#[case::drop_some("drop", 2, vec![3])]
#[case::drop_right_some("drop_right", 1, vec![1, 2])]
#[case::drop_right_negative("drop_right", -1, vec![1, 2, 3])]
fn test_slice_boundaries(
    #[case] operation: &str,
    #[case] count: isize,
    #[case] expected: Vec<i32>,
    #[values(eager as Build<i32>, lazy as Build<i32>)] build: Build<i32>,
) {
    let numbers = build(vec![1, 2, 3]);
    let sliced = match operation {
        "take" => numbers.take(count),
        "take_right" => numbers.take_right(count),
        "drop" => numbers.drop(count),
        _ => numbers.drop_right(count),
    };
    assert_eq!(sliced.to_vec(), expected);
}

#[rstest]
fn test_take_and_drop_while() {
    let numbers = Seq::lazy([1, 2, 5, 1, 7]);
    assert_eq!(numbers.take_while(|n| *n < 3).to_vec(), vec![1, 2]);
    assert_eq!(numbers.drop_while(|n| *n < 3).to_vec(), vec![5, 1, 7]);
}

// =============================================================================
// Conversions to Map
// =============================================================================

#[rstest]
#[case::eager(eager as Build<(&'static str, &'static str)>)]
#[case::lazy(lazy as Build<(&'static str, &'static str)>)]
fn test_group_by_keeps_group_and_member_order(
    #[case] build: Build<(&'static str, &'static str)>,
) {
    let cars = build(vec![
        ("Fit", "Honda"),
        ("Levorg", "Subaru"),
        ("Civic", "Honda"),
    ]);
    let by_maker = cars.group_by(|(_, maker)| *maker);
    assert_eq!(by_maker.keys().to_vec(), vec!["Honda", "Subaru"]);
    assert_eq!(
        by_maker.at("Honda").map(|models| models.to_vec()),
        Ok(vec![("Fit", "Honda"), ("Civic", "Honda")])
    );
}

#[rstest]
fn test_group_by_field() {
    let rows = Seq::from_items([
        HashMap::from([("team", "red"), ("name", "a")]),
        HashMap::from([("team", "blue"), ("name", "b")]),
        HashMap::from([("team", "red"), ("name", "c")]),
    ]);
    let teams = rows.group_by_field("team").map(|teams| {
        teams
            .map_values(|members| members.len())
            .to_vec()
    });
    assert_eq!(teams, Ok(vec![("red", 2), ("blue", 1)]));
}

#[rstest]
fn test_to_map_last_element_wins() {
    let words = Seq::from_items(["apple", "avocado", "banana"]);
    let by_initial: Map<char, &str> = words.to_map(|word| word.chars().next().unwrap_or(' '));
    assert_eq!(by_initial.to_vec(), vec![('a', "avocado"), ('b', "banana")]);
}

#[rstest]
fn test_to_map_by_field_reports_missing_key() {
    let rows = Seq::from_items([vec![1, 2], vec![3]]);
    assert!(rows.to_map_by_field(&1).is_err());
    let pairs = Seq::from_items([vec![1, 2], vec![3, 4]]);
    assert_eq!(
        pairs.to_map_by_field(&0).map(|map| map.keys().to_vec()),
        Ok(vec![1, 3])
    );
}

// =============================================================================
// Identity
// =============================================================================

#[rstest]
fn test_empty_is_shared() {
    let first: Seq<u8> = Seq::empty();
    let second: Seq<u8> = Seq::empty();
    assert!(Seq::ptr_eq(&first, &second));
    assert!(first.is_empty());
    assert!(Seq::ptr_eq(&Seq::<u8>::default(), &first));
}

#[rstest]
fn test_from_source_of_none_is_shared_empty() {
    let seq: Seq<u8> = Seq::from_source(None::<Vec<u8>>);
    assert!(Seq::ptr_eq(&seq, &Seq::empty()));
}

#[rstest]
fn test_eager_and_lazy_sequences_compare_equal() {
    assert_eq!(Seq::from_items([1, 2, 3]), Seq::lazy(1..=3));
    assert_ne!(Seq::from_items([1, 2]), Seq::lazy(1..=3));
}

#[rstest]
fn test_at_reports_index_out_of_range() {
    let numbers = Seq::lazy([7, 8]);
    assert_eq!(numbers.at(1), Ok(8));
    assert_eq!(
        numbers.at(5),
        Err(CollectionError::IndexOutOfRange {
            index: 5,
            length: 2
        })
    );
}

#[rstest]
fn test_head_and_last() {
    let numbers = Seq::lazy(1..=3);
    assert_eq!(numbers.head(), Ok(1));
    assert_eq!(numbers.last(), Ok(3));
    assert_eq!(Seq::<i32>::empty().head_option(), Maybe::None);
    assert!(Seq::<i32>::empty().last().is_err());
}
