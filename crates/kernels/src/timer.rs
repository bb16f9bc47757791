use std::cmp::Ordering;
use std::time::Instant;

use common::{BenchError, BenchResult};

/// Источник монотонного времени в секундах
///
/// Значения имеют смысл только как разность двух чтений одного и того же
/// источника.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Монотонные часы на `std::time::Instant` (CLOCK_MONOTONIC на Linux)
///
/// Не зависят от перевода системного времени.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// `end - start`; часы, идущие назад, - фатальное состояние окружения
pub fn elapsed(start: f64, end: f64) -> BenchResult<f64> {
    match end.partial_cmp(&start) {
        Some(Ordering::Greater | Ordering::Equal) => Ok(end - start),
        // NaN тоже сюда
        _ => Err(BenchError::ClockWentBackwards { start, end }),
    }
}

/// Замерить одно выполнение `f`
pub fn measure<C, F>(clock: &C, f: F) -> BenchResult<f64>
where
    C: Clock + ?Sized,
    F: FnOnce(),
{
    let start = clock.now();
    f();
    let end = clock.now();
    elapsed(start, end)
}
