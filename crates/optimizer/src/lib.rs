//! Source-to-source оптимизатор циклов для маленького C-подобного языка
//!
//! Те же три преобразования, что сделаны вручную в `kernels::optimized`,
//! только механически: LICM, слияние циклов и разворот.
//!
//! ```
//! let code = optimizer::compile(
//!     "int a[8]; int b[8];
//!      for (int i = 0; i < 8; i++) { a[i] = b[i] + 1; }",
//! ).unwrap();
//! assert!(code.contains("i += 2"));
//! ```

#![allow(clippy::uninlined_format_args)]

pub mod ast;
pub mod codegen;
pub mod errors;
pub mod eval;
pub mod ir;
pub mod lexer;
pub mod lower;
pub mod parser;
pub mod passes;
pub mod pipeline;

pub use errors::{OptimizerError, OptimizerResult};
pub use pipeline::{compile, Compiled, Optimizer, OptimizerConfig, PassReport};
