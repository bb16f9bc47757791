pub mod bench;
pub mod optimize;

pub use bench::BenchCommand;
pub use optimize::OptimizeCommand;
