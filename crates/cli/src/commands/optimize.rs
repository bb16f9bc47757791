use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use optimizer::{Optimizer, OptimizerConfig};
use tracing::debug;

#[derive(Debug, Args)]
pub struct OptimizeCommand {
    /// Файл с исходником; без него читается stdin
    path: Option<PathBuf>,

    /// Не выносить инварианты из циклов
    #[arg(long)]
    no_licm: bool,

    /// Не сливать соседние циклы
    #[arg(long)]
    no_fusion: bool,

    /// Не разворачивать циклы
    #[arg(long)]
    no_unroll: bool,

    /// Коэффициент разворота
    #[arg(long, value_name = "K", default_value_t = 2)]
    unroll_factor: usize,
}

impl OptimizeCommand {
    fn config(&self) -> OptimizerConfig {
        OptimizerConfig {
            licm: !self.no_licm,
            fusion: !self.no_fusion,
            unroll: !self.no_unroll,
            unroll_factor: self.unroll_factor,
        }
    }

    fn read_source(&self) -> Result<String> {
        match &self.path {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            None => {
                let mut source = String::new();
                std::io::stdin()
                    .read_to_string(&mut source)
                    .context("Failed to read source from stdin")?;
                Ok(source)
            }
        }
    }

    pub fn execute(self) -> Result<()> {
        let optimizer = Optimizer::new(self.config())?;
        debug!(config = ?optimizer.config(), "Optimizer configured");
        debug!(path = ?self.path, "Reading loop source");
        let source = self.read_source()?;
        let compiled = optimizer.compile(&source)?;
        println!("{}", compiled.code);
        Ok(())
    }
}
