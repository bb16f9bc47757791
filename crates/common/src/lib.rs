pub mod config_base;
pub mod errors;
pub mod structured_logging;

pub use structured_logging::{
    init_structured_logging,
    LoggingConfig,
    StructuredLogEntry,
    OperationTimer,
};

pub use errors::{BenchError, BenchResult, ErrorSeverity};

pub use config_base::BenchConfig;
