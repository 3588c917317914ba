#[macro_use]
extern crate hamcrest;

use console_io::token_parser::{clean_tokens, split_tokens};
use console_io::{ConsoleError, TokenReader};
use hamcrest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::io::Cursor;

fn reader(input: &str) -> TokenReader<Cursor<Vec<u8>>> {
    TokenReader::new(Cursor::new(input.as_bytes().to_vec()))
}

fn strings(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| (*t).to_string()).collect()
}

#[test]
fn read_array_splits_without_trimming() {
    let mut reader = reader("a, b,,c\n");

    assert_eq!(reader.read_array(","), strings(&["a", " b", "", "c"]));
}

#[test]
fn read_array_clean_drops_empty_tokens() {
    let mut reader = reader("1  2   3\n");

    assert_eq!(reader.read_array_clean(" "), strings(&["1", "2", "3"]));
}

#[test]
fn clean_is_filtered_split() {
    let lines = ["", " ", "a b", "  a  b  ", "x,,y,", "::a::::b", "abc"];
    let separators = [" ", ",", "::", ""];

    for line in lines {
        for sep in separators {
            // the reader trims every line before splitting
            let split = split_tokens(line.trim(), sep);
            let expected: Vec<String> = split
                .iter()
                .filter(|t| !t.is_empty() && t.as_str() != sep)
                .cloned()
                .collect();

            let mut reader = reader(line);
            assert_eq!(reader.read_array_clean(sep), expected, "line={line:?} sep={sep:?}");
            assert_eq!(clean_tokens(split, sep), expected);
        }
    }
}

#[test]
fn read_hashset_dedupes_and_drops_spurious_members() {
    let mut reader = reader("b,a,,b,a,c\n");

    let expected: HashSet<String> = ["a", "b", "c"].iter().map(|s| (*s).to_string()).collect();
    assert_that!(reader.read_hashset(","), is(equal_to(expected)));
}

#[test]
fn read_pairs_even() {
    let mut reader = reader("k1 v1 k2 v2\n");

    let pairs = reader.read_pairs(" ", 0);
    assert_that!(pairs.len(), is(equal_to(2)));
    assert_eq!(pairs["k1"], "v1");
    assert_eq!(pairs["k2"], "v2");
}

#[test]
fn read_pairs_with_skip_and_odd_tail() {
    let mut reader = reader("CMD k1 v1 k2\n");

    let pairs = reader.read_pairs(" ", 1);
    let expected: HashMap<String, String> = [("k1", "v1"), ("k2", "")]
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    assert_that!(pairs, is(equal_to(expected)));
}

#[test]
fn read_pairs_last_duplicate_wins() {
    let mut reader = reader("a 1 b 2 a 3\n");

    let pairs = reader.read_pairs(" ", 0);
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs["a"], "3");
}

#[test]
fn full_pair_wins_over_trailing_key() {
    let mut reader = reader("a 1 a\na 5 a\n");

    let pairs = reader.read_pairs(" ", 0);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs["a"], "1");

    let int_pairs = reader.read_string_int_pairs(" ", 0).unwrap();
    assert_eq!(int_pairs.len(), 1);
    assert_eq!(int_pairs["a"], 5);
}

#[test]
fn read_pairs_empty_line() {
    let mut reader = reader("\n");

    assert!(reader.read_pairs(" ", 0).is_empty());
}

#[test]
fn read_string_int_pairs_happy_path() {
    let mut reader = reader("x 10 y -2 z\n");

    let pairs = reader.read_string_int_pairs(" ", 0).unwrap();
    assert_eq!(pairs.len(), 3);
    assert_eq!(pairs["x"], 10);
    assert_eq!(pairs["y"], -2);
    assert_eq!(pairs["z"], 0);
}

#[test]
fn read_string_int_pairs_fails_without_partial_result() {
    let mut reader = reader("a 1 b x\n");

    let err = reader.read_string_int_pairs(" ", 0).unwrap_err();
    match err {
        ConsoleError::Parse { token, .. } => assert_eq!(token, "x"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn read_boolean_is_case_insensitive_exact_match() {
    let mut reader = reader("y\nyes\n\nY\n");

    assert!(reader.read_boolean("Y"));
    assert!(!reader.read_boolean("Y"));
    assert!(!reader.read_boolean("Y"));
    assert!(reader.read_boolean("y"));
    // end of input reads as an empty line
    assert!(!reader.read_boolean("Y"));
}

#[test]
fn read_int() {
    let mut reader = reader(" 42 \n-7\nabc\n");

    assert_eq!(reader.read_int().unwrap(), 42);
    assert_eq!(reader.read_int().unwrap(), -7);
    assert!(matches!(reader.read_int(), Err(ConsoleError::Parse { .. })));
    assert!(reader.read_int().is_err(), "end of input is not a number");
}

#[test]
fn read_int_array() {
    let mut reader = reader("1,2,,3\n1,two,3\n");

    assert_eq!(reader.read_int_array(",").unwrap(), vec![1, 2, 3]);
    let err = reader.read_int_array(",").unwrap_err();
    assert!(err.to_string().contains("'two'"));
}

#[test]
fn each_read_consumes_one_line() {
    let mut reader = reader("3\n1 2 3\nk v\n");

    let n = reader.read_int().unwrap();
    let values = reader.read_int_array(" ").unwrap();
    let pairs = reader.read_pairs(" ", 0);

    assert_eq!(usize::try_from(n).unwrap(), values.len());
    assert_eq!(pairs["k"], "v");
    assert_eq!(reader.next_line(), None);
}

#[test]
fn into_inner_returns_unread_input() {
    let mut reader = reader("1\nrest\n");

    assert_eq!(reader.read_int().unwrap(), 1);
    let inner = reader.into_inner();
    let pos = usize::try_from(inner.position()).unwrap();
    assert_eq!(&inner.get_ref()[pos..], b"rest\n");
}
