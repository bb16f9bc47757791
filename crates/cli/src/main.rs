use anyhow::Result;
use clap::{Parser, Subcommand};
use common::{init_structured_logging, LoggingConfig};

mod commands;
use commands::{BenchCommand, OptimizeCommand};

#[derive(Parser)]
#[command(name = "loopbench")]
#[command(about = "LICM, loop fusion и unrolling: ручная оптимизация и её замер")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Подробные логи (debug) в stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Логи в формате JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Замерить неоптимизированное и оптимизированное ядро (по умолчанию)
    Bench(BenchCommand),
    /// Применить LICM, fusion и unrolling к исходнику на мини-языке
    Optimize(OptimizeCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = if cli.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    };
    if cli.log_json {
        logging = logging.json();
    }
    init_structured_logging(logging)?;

    match cli.command {
        Some(Commands::Bench(cmd)) => cmd.execute(),
        Some(Commands::Optimize(cmd)) => cmd.execute(),
        // Без аргументов - демонстрационный прогон
        None => BenchCommand::default().execute(),
    }
}
