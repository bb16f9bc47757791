use std::fmt;
use std::hint::black_box;

use common::{config_bail, BenchConfig, BenchResult, OperationTimer};
use tracing::debug;

use crate::arrays::ArraySet;
use crate::timer::{measure, Clock};
use crate::{naive, optimized};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelKind {
    Unoptimized,
    Optimized,
}

impl KernelKind {
    pub const ALL: [KernelKind; 2] = [KernelKind::Unoptimized, KernelKind::Optimized];

    pub fn label(self) -> &'static str {
        match self {
            KernelKind::Unoptimized => "Unoptimized",
            KernelKind::Optimized => "Optimized",
        }
    }

    pub fn run(self, set: &mut ArraySet) {
        match self {
            KernelKind::Unoptimized => naive::run(set),
            KernelKind::Optimized => optimized::run(set),
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Одно измерение ядра
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub kind: KernelKind,
    pub seconds: f64,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} time: {:.9} seconds", self.kind, self.seconds)
    }
}

/// Отчёт: по одному измерению на ядро, в порядке запуска
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchReport {
    pub len: usize,
    pub unoptimized: Measurement,
    pub optimized: Measurement,
}

impl BenchReport {
    /// Во сколько раз оптимизированная версия быстрее; `None` при нулевом времени
    pub fn speedup(&self) -> Option<f64> {
        (self.optimized.seconds > 0.0).then(|| self.unoptimized.seconds / self.optimized.seconds)
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.unoptimized)?;
        write!(f, "{}", self.optimized)
    }
}

/// Сбросить `a`, выполнить ядро один раз под часами
pub fn time_kernel<C: Clock + ?Sized>(
    clock: &C,
    kind: KernelKind,
    set: &mut ArraySet,
) -> BenchResult<Measurement> {
    set.reset();
    let seconds = measure(clock, || kind.run(black_box(&mut *set)))?;
    black_box(set.a());

    debug!(kernel = %kind, len = set.len(), seconds, "Kernel timed");
    Ok(Measurement { kind, seconds })
}

/// Демонстрационный прогон: один замер на ядро, без прогрева
///
/// init → unoptimized → reset → optimized
pub fn run_benchmark<C: Clock + ?Sized>(
    config: &BenchConfig,
    clock: &C,
) -> BenchResult<BenchReport> {
    let mut timer = OperationTimer::new("run_benchmark");
    timer.add_field("len", config.len);

    let mut set = ArraySet::from_config(config)?;
    let unoptimized = time_kernel(clock, KernelKind::Unoptimized, &mut set)?;
    let optimized = time_kernel(clock, KernelKind::Optimized, &mut set)?;

    let report = BenchReport {
        len: config.len,
        unoptimized,
        optimized,
    };
    debug!(speedup = ?report.speedup(), "Benchmark finished");
    timer.finish();
    Ok(report)
}

/// Медиана по `runs` прогонам каждого ядра
///
/// Порядок ядер чередуется между прогонами, чтобы кэш не подыгрывал
/// одному из них. Для тестов, CLI делает один прогон.
pub fn median_timings<C: Clock + ?Sized>(
    config: &BenchConfig,
    runs: usize,
    clock: &C,
) -> BenchResult<BenchReport> {
    if runs == 0 {
        config_bail!("runs", "must be at least 1");
    }

    let mut set = ArraySet::from_config(config)?;
    let mut unoptimized = Vec::with_capacity(runs);
    let mut optimized = Vec::with_capacity(runs);

    for run in 0..runs {
        let order = if run % 2 == 0 {
            KernelKind::ALL
        } else {
            [KernelKind::Optimized, KernelKind::Unoptimized]
        };
        for kind in order {
            let m = time_kernel(clock, kind, &mut set)?;
            match kind {
                KernelKind::Unoptimized => unoptimized.push(m.seconds),
                KernelKind::Optimized => optimized.push(m.seconds),
            }
        }
    }

    Ok(BenchReport {
        len: config.len,
        unoptimized: Measurement {
            kind: KernelKind::Unoptimized,
            seconds: median(&mut unoptimized),
        },
        optimized: Measurement {
            kind: KernelKind::Optimized,
            seconds: median(&mut optimized),
        },
    })
}

fn median(samples: &mut [f64]) -> f64 {
    samples.sort_unstable_by(f64::total_cmp);
    let mid = samples.len() / 2;
    if samples.len() % 2 == 0 {
        (samples[mid - 1] + samples[mid]) / 2.0
    } else {
        samples[mid]
    }
}
