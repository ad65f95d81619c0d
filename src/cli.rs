// ==========================================
// 产线流转仿真 - 命令行参数
// ==========================================
// 子命令: run（配置文件 / 工序表）/ interactive（交互录入）
// 覆写顺序: 文件或交互 → 环境变量 → 命令行
// ==========================================

use crate::config::{ArrivalConfig, SimulationConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "line-flow-sim")]
#[command(about = "Multi-stage production line flow simulator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Only log warnings and skip the per-day progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a simulation from a config file or a stage table
    Run {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Prompt for stage parameters on stdin, then run
    Interactive {
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// JSON simulation config
    #[arg(long, conflicts_with = "stages", required_unless_present = "stages")]
    pub config: Option<PathBuf>,

    /// Stage table (.csv / .xlsx / .xls)
    #[arg(long, requires = "initial_tasks")]
    pub stages: Option<PathBuf>,

    /// Tasks seeded into the first stage (with --stages)
    #[arg(long)]
    pub initial_tasks: Option<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Workday length in minutes (overrides config and environment)
    #[arg(long)]
    pub work_minutes: Option<u32>,

    /// Abort when the line is still busy after this many workdays
    #[arg(long)]
    pub max_days: Option<u32>,

    /// Write the day-by-day history (.xlsx, .csv or .json)
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Inject random batches into the first stage while running
    #[arg(long)]
    pub arrivals: bool,

    /// Milliseconds between arrival batches
    #[arg(long, default_value = "3000")]
    pub arrival_interval_ms: u64,

    /// Largest arrival batch
    #[arg(long, default_value = "20")]
    pub arrival_max: u32,

    /// Seed for arrival batches
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause between workdays when arrivals are enabled (ms)
    #[arg(long, default_value = "1000")]
    pub step_delay_ms: u64,
}

impl RunArgs {
    /// 命令行参数覆写配置
    pub fn apply(&self, config: &mut SimulationConfig) {
        if let Some(minutes) = self.work_minutes {
            config.work_minutes_per_day = minutes;
        }
        if let Some(max_days) = self.max_days {
            config.max_days = max_days;
        }
        if self.arrivals {
            config.arrival = Some(ArrivalConfig {
                interval_ms: self.arrival_interval_ms,
                max_tasks: self.arrival_max,
                seed: self.seed,
            });
        }
    }
}
