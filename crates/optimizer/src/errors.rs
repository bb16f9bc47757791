use thiserror::Error;

/// Ошибки фронтенда и конфигурации оптимизатора
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptimizerError {
    #[error("Syntax error at token '{found}' (line {line}): expected {expected}")]
    Syntax {
        line: usize,
        found: String,
        expected: String,
    },

    #[error("Syntax error at EOF: expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("Number too large (line {line}): {literal}")]
    NumberOverflow { line: usize, literal: String },

    #[error("Unsupported construct (line {line}): {reason}")]
    Unsupported { line: usize, reason: String },

    #[error("Invalid optimizer configuration: {0}")]
    InvalidConfig(String),
}

impl OptimizerError {
    pub fn line(&self) -> Option<usize> {
        match self {
            OptimizerError::Syntax { line, .. }
            | OptimizerError::NumberOverflow { line, .. }
            | OptimizerError::Unsupported { line, .. } => Some(*line),
            OptimizerError::UnexpectedEof { .. } | OptimizerError::InvalidConfig(_) => None,
        }
    }

    pub(crate) fn unsupported(line: usize, reason: impl Into<String>) -> Self {
        OptimizerError::Unsupported {
            line,
            reason: reason.into(),
        }
    }
}

pub type OptimizerResult<T> = Result<T, OptimizerError>;
