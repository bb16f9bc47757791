//! Оптимизирующие проходы над IR
//!
//! Каждый проход меняет программу на месте и возвращает число
//! применённых преобразований.

pub mod fusion;
pub mod licm;
pub mod unroll;

pub use fusion::fuse_loops;
pub use licm::hoist_invariants;
pub use unroll::unroll_loops;
