use anyhow::Result;
use clap::Args;
use common::BenchConfig;
use kernels::{run_benchmark, MonotonicClock};

/// Один прогон без прогрева, размер массивов фиксирован
#[derive(Debug, Default, Args)]
pub struct BenchCommand {}

impl BenchCommand {
    pub fn execute(self) -> Result<()> {
        let clock = MonotonicClock::new();
        let report = run_benchmark(&BenchConfig::default(), &clock)?;
        println!("{}", report);
        Ok(())
    }
}
