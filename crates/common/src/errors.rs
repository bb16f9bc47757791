use thiserror::Error;

/// Иерархия ошибок бенчмарка
///
/// Ядра (kernels) ошибок не возвращают: вся арифметика идёт по данным
/// фиксированного размера. Ошибки возникают только на границах:
/// размер массивов, чтение часов, конфигурация. Ввод-вывод CLI идёт через anyhow.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Монотонные часы пошли назад: окружение сломано, продолжать нельзя
    #[error("Monotonic clock went backwards: start {start:.9}s, end {end:.9}s")]
    ClockWentBackwards { start: f64, end: f64 },

    #[error("Array length out of range: {len} (max {max})")]
    LengthOutOfRange { len: usize, max: usize },

    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfig { field: String, reason: String },
}

/// Error severity для alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    Critical,
}

impl BenchError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Critical - измерение бессмысленно
            BenchError::ClockWentBackwards { .. } => ErrorSeverity::Critical,
            BenchError::InvalidConfig { .. } => ErrorSeverity::Medium,
            BenchError::LengthOutOfRange { .. } => ErrorSeverity::Low,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            BenchError::ClockWentBackwards { .. } => "CLOCK_ERROR",
            BenchError::LengthOutOfRange { .. } => "LENGTH_ERROR",
            BenchError::InvalidConfig { .. } => "CONFIG_ERROR",
        }
    }

    /// Фатальные ошибки: процесс не должен продолжать работу
    pub fn is_fatal(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }
}

/// Result type alias для удобства
pub type BenchResult<T> = Result<T, BenchError>;

/// Макрос для bail с BenchError::InvalidConfig
#[macro_export]
macro_rules! config_bail {
    ($field:expr, $($arg:tt)*) => {
        return Err($crate::errors::BenchError::InvalidConfig {
            field: $field.to_string(),
            reason: format!($($arg)*),
        })
    };
}
