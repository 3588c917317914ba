use console_io::{ConsoleConfig, ConsoleError, DEFAULT_QUEUE_CAPACITY};
use std::io::Cursor;

#[test]
fn test_config_happy_path() {
    let input = r#"{"queue_capacity": 16, "worker_name": "out"}"#;
    let reader = Cursor::new(input.as_bytes());

    let config = ConsoleConfig::from_reader(reader).unwrap();

    assert_eq!(config.queue_capacity, 16);
    assert_eq!(config.worker_name, "out");
    assert_eq!(config.log_indent, "\t");
}

#[test]
fn test_config_empty_object_gives_defaults() {
    let config = ConsoleConfig::from_reader(Cursor::new("{}")).unwrap();

    assert_eq!(config, ConsoleConfig::default());
    assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
}

#[test]
fn test_config_rejects_bad_input() {
    let cases = [
        "not json",
        r#"{"queue_capacity": -1}"#,
        r#"{"queue_capacity": 0}"#,
        r#"{"unknown": true}"#,
    ];

    for input in cases {
        let err = ConsoleConfig::from_reader(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)), "input: {input}");
    }
}
