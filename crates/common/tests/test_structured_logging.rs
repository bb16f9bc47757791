use common::{init_structured_logging, BenchConfig, LoggingConfig, OperationTimer, StructuredLogEntry};
use rstest::rstest;
use serde_json::Value;
use std::collections::HashMap;

#[test]
fn test_init_only_once() {
    // Глобальный subscriber ставится один раз на процесс
    assert!(init_structured_logging(LoggingConfig::verbose().json()).is_ok());
    assert!(init_structured_logging(LoggingConfig::default()).is_err());

    // После инициализации логи не ломают вызывающий код
    let mut timer = OperationTimer::new("after_init");
    timer.add_field("len", 4);
    timer.finish();
}

#[test]
fn test_structured_log_entry_roundtrip() {
    let mut fields = HashMap::new();
    fields.insert("seconds".to_string(), serde_json::json!(0.000123456));

    let entry = StructuredLogEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: "DEBUG".to_string(),
        target: "kernels".to_string(),
        message: "Kernel timed".to_string(),
        fields,
    };

    let line = entry.to_json_line().unwrap();
    let parsed: StructuredLogEntry = serde_json::from_str(&line).unwrap();

    assert_eq!(parsed.level, "DEBUG");
    assert_eq!(parsed.message, "Kernel timed");
    assert_eq!(parsed.fields.get("seconds").and_then(Value::as_f64), Some(0.000123456));
}

#[rstest]
#[case(0, true)]
#[case(100_000, true)]
#[case(usize::MAX, false)]
fn test_bench_config_validation(#[case] len: usize, #[case] valid: bool) {
    assert_eq!(BenchConfig::with_len(len).validate().is_ok(), valid);
}
