use common::OperationTimer;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codegen::emit;
use crate::errors::{OptimizerError, OptimizerResult};
use crate::ir::Program;
use crate::lower::lower;
use crate::parser::parse;
use crate::passes::{fuse_loops, hoist_invariants, unroll_loops};

/// Какие проходы включены
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub licm: bool,
    pub fusion: bool,
    pub unroll: bool,
    pub unroll_factor: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            licm: true,
            fusion: true,
            unroll: true,
            unroll_factor: 2,
        }
    }
}

impl OptimizerConfig {
    /// Только разбор и печать, без преобразований
    pub fn passthrough() -> Self {
        Self {
            licm: false,
            fusion: false,
            unroll: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> OptimizerResult<()> {
        if self.unroll_factor == 0 {
            return Err(OptimizerError::InvalidConfig(
                "unroll_factor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Сколько раз сработал каждый проход
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub hoisted: usize,
    pub fused: usize,
    pub unrolled: usize,
}

#[derive(Debug, Clone)]
pub struct Compiled {
    pub program: Program,
    pub code: String,
    pub report: PassReport,
}

/// LICM → fusion → unrolling, в этом порядке
///
/// Вынос инварианта первым оставляет соседние циклы соседними, а
/// разворот последним работает уже со слитым телом.
#[derive(Debug, Clone)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> OptimizerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn optimize(&self, program: &mut Program) -> PassReport {
        let mut report = PassReport::default();
        if self.config.licm {
            report.hoisted = hoist_invariants(program);
        }
        if self.config.fusion {
            report.fused = fuse_loops(program);
        }
        if self.config.unroll {
            report.unrolled = unroll_loops(program, self.config.unroll_factor);
        }
        report
    }

    pub fn compile(&self, source: &str) -> OptimizerResult<Compiled> {
        let mut timer = OperationTimer::new("compile");
        timer.add_field("source_bytes", source.len());

        let result = parse(source).and_then(|ast| lower(&ast));
        let _ = timer.finish_with_result(&result);
        let mut program = result?;

        let report = self.optimize(&mut program);
        info!(
            hoisted = report.hoisted,
            fused = report.fused,
            unrolled = report.unrolled,
            "Optimization passes applied"
        );

        Ok(Compiled {
            code: emit(&program),
            program,
            report,
        })
    }
}

/// Скомпилировать с настройками по умолчанию
pub fn compile(source: &str) -> OptimizerResult<String> {
    Ok(Optimizer::new(OptimizerConfig::default())?.compile(source)?.code)
}
