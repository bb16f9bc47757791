use serde::{Deserialize, Serialize};

use crate::config_bail;
use crate::errors::BenchResult;

/// Длина массивов в демонстрационном прогоне
pub const DEFAULT_ARRAY_LEN: usize = 100_000;

/// Максимальная длина: `c[i] = N - i` и `b[i] + c[i] + 1` должны влезать в i32
pub const MAX_ARRAY_LEN: usize = (i32::MAX - 1) as usize;

/// Базовая конфигурация бенчмарка
///
/// CLI всегда использует `BenchConfig::default()`; пресеты нужны тестам
/// и criterion-бенчам.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    pub len: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            len: DEFAULT_ARRAY_LEN,
        }
    }
}

impl BenchConfig {
    pub fn small() -> Self {
        Self { len: 4 }
    }

    pub fn with_len(len: usize) -> Self {
        Self { len }
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.len > MAX_ARRAY_LEN {
            config_bail!("len", "{} exceeds maximum {}", self.len, MAX_ARRAY_LEN);
        }
        Ok(())
    }
}
