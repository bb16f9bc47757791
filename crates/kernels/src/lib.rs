//! Ручные оптимизации циклов и таймер для их сравнения
//!
//! Два численно эквивалентных ядра над тремя массивами:
//! - [`naive`] - два прохода и пересчёт инварианта на каждой итерации
//! - [`optimized`] - инвариант вынесен из цикла (LICM), проходы слиты
//!   (fusion), тело развёрнуто на 2 (unrolling)
//!
//! После любого ядра `a[i] == b[i] + c[i] + 1`.

#![allow(clippy::uninlined_format_args)]

pub mod arrays;
pub mod harness;
pub mod naive;
pub mod optimized;
pub mod timer;

pub use arrays::ArraySet;
pub use harness::{median_timings, run_benchmark, time_kernel, BenchReport, KernelKind, Measurement};
pub use timer::{elapsed, Clock, MonotonicClock};
