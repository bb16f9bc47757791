use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

/// Структурированная запись лога в JSON формате
///
/// Все логи пишутся в stderr: stdout принадлежит отчёту бенчмарка
/// и выводу оптимизатора.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredLogEntry {
    /// Временная метка в ISO 8601 формате
    pub timestamp: String,
    /// Уровень логирования
    pub level: String,
    /// Целевой модуль/компонент
    pub target: String,
    /// Основное сообщение
    pub message: String,
    /// Дополнительные поля
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl StructuredLogEntry {
    pub fn to_json_line(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

/// Слой, печатающий каждое событие одной JSON-строкой в stderr
pub struct JsonLinesLayer;

impl<S> Layer<S> for JsonLinesLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut fields = FieldCollector::default();
        event.record(&mut fields);

        let meta = event.metadata();
        let entry = StructuredLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            level: level_name(meta.level()).to_string(),
            target: meta.target().to_string(),
            message: fields.message.unwrap_or_default(),
            fields: fields.values,
        };

        if let Some(line) = entry.to_json_line() {
            // stderr закрыт - писать некуда
            let _ = writeln!(io::stderr().lock(), "{}", line);
        }
    }
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

/// Имя поля, под которым `OperationTimer` пишет свои дополнительные поля
const TIMER_FIELDS: &str = "fields";

/// Собирает поля события; `message` хранится отдельно
#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    values: HashMap<String, Value>,
}

impl FieldCollector {
    fn put(&mut self, name: &str, value: Value) {
        match (name, value) {
            ("message", Value::String(text)) => self.message = Some(text),
            // Поля OperationTimer приходят одной JSON-строкой и раскладываются на верхний уровень
            (TIMER_FIELDS, Value::String(text)) => match serde_json::from_str(&text) {
                Ok(Value::Object(map)) => self.values.extend(map),
                _ => {
                    self.values.insert(TIMER_FIELDS.to_string(), Value::String(text));
                }
            },
            (name, value) => {
                self.values.insert(name.to_string(), value);
            }
        }
    }
}

impl Visit for FieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field.name(), Value::String(format!("{:?}", value)));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field.name(), Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field.name(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field.name(), Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        // NaN и бесконечности в JSON не представимы
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.put(field.name(), Value::Number(n));
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field.name(), Value::Bool(value));
    }
}

/// Конфигурация для structured logging
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Минимальный уровень логирования (RUST_LOG имеет приоритет)
    pub level: Level,
    /// Вывод в JSON формате
    pub json_output: bool,
    /// Включить цветной вывод (только для non-JSON)
    pub color_output: bool,
    /// Включить номера строк
    pub include_line_numbers: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            // Тихо по умолчанию: stdout бенчмарка - ровно две строки
            level: Level::WARN,
            json_output: false,
            color_output: true,
            include_line_numbers: cfg!(debug_assertions),
        }
    }
}

impl LoggingConfig {
    pub fn verbose() -> Self {
        Self {
            level: Level::DEBUG,
            ..Self::default()
        }
    }

    pub fn json(mut self) -> Self {
        self.json_output = true;
        self.color_output = false;
        self
    }
}

/// Инициализировать structured logging
pub fn init_structured_logging(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    if config.json_output {
        let subscriber = Registry::default().with(env_filter).with(JsonLinesLayer);

        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        // Человекочитаемый формат для разработки
        let fmt_layer = fmt::layer()
            .with_writer(io::stderr)
            .with_target(true)
            .with_line_number(config.include_line_numbers)
            .with_ansi(config.color_output);

        let subscriber = Registry::default().with(env_filter).with(fmt_layer);

        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

/// Вспомогательная структура для измерения времени операций
///
/// Это диагностика, а не измерение бенчмарка: отчётные времена
/// снимаются через `kernels::timer`.
pub struct OperationTimer {
    start: Instant,
    operation_name: String,
    fields: HashMap<String, Value>,
}

impl OperationTimer {
    pub fn new(operation_name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation_name: operation_name.into(),
            fields: HashMap::new(),
        }
    }

    pub fn add_field(&mut self, key: impl Into<String>, value: impl Serialize) {
        if let Ok(v) = serde_json::to_value(value) {
            self.fields.insert(key.into(), v);
        }
    }

    /// Залогировать длительность как успешную
    pub fn finish(self) -> Duration {
        self.finish_with_result::<(), String>(&Ok(()))
    }

    /// Успех пишется на debug, ошибка на error вместе с текстом ошибки
    pub fn finish_with_result<T, E: std::fmt::Display>(self, result: &Result<T, E>) -> Duration {
        let elapsed = self.start.elapsed();
        let duration_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        let fields = serde_json::to_string(&self.fields).unwrap_or_default();

        match result {
            Ok(_) => tracing::debug!(
                operation = %self.operation_name,
                duration_us,
                fields = %fields,
                "Operation completed"
            ),
            Err(e) => tracing::error!(
                operation = %self.operation_name,
                duration_us,
                error = %e,
                fields = %fields,
                "Operation failed"
            ),
        }
        elapsed
    }
}
