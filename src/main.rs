// ==========================================
// 产线流转仿真 - 命令行入口
// ==========================================
// 流程: 参数解析 → 配置加载/录入 → 推演 → 导出
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use line_flow_sim::app::{write_completion, write_initial_state, ConsoleReporter, PromptSession};
use line_flow_sim::cli::{Cli, Commands, SourceArgs};
use line_flow_sim::config::SimulationConfig;
use line_flow_sim::engine::{
    run_with_arrivals, ArrivalGenerator, LoggingEventPublisher, SimulationEventPublisher,
    SimulationRunner,
};
use line_flow_sim::{export_history, logging, APP_NAME, VERSION};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

fn load_config(source: &SourceArgs) -> Result<SimulationConfig> {
    if let Some(path) = &source.config {
        return SimulationConfig::from_json_file(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()));
    }

    // clap 已保证 --stages 与 --initial-tasks 成对出现
    let path = source.stages.as_ref().context("缺少 --config 或 --stages")?;
    let initial_tasks = source.initial_tasks.context("缺少 --initial-tasks")?;
    SimulationConfig::from_stage_table(path, initial_tasks)
        .with_context(|| format!("无法读取工序表 {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet { "warn" } else { "info" };
    if cli.log_json {
        logging::init_json(level);
    } else {
        logging::init(level);
    }
    tracing::info!(version = VERSION, "{}", APP_NAME);

    let (mut config, run) = match cli.command {
        Commands::Run { source, run } => (load_config(&source)?, run),
        Commands::Interactive { run } => {
            let mut session = PromptSession::new(io::stdin().lock(), io::stdout());
            (session.collect_config().context("交互录入失败")?, run)
        }
    };

    config.apply_env_overrides()?;
    run.apply(&mut config);
    let mut pipeline = config.build_pipeline().context("产线配置无效")?;

    tracing::info!(
        stages = pipeline.stages().len(),
        initial_tasks = config.initial_tasks,
        work_minutes_per_day = config.work_minutes_per_day,
        "开始推演"
    );

    let publisher: Arc<dyn SimulationEventPublisher> = if cli.quiet {
        Arc::new(LoggingEventPublisher)
    } else {
        write_initial_state(&mut io::stdout(), &pipeline)?;
        Arc::new(ConsoleReporter::stdout())
    };
    let runner = SimulationRunner::new(config.max_days).with_publisher(publisher);

    let summary = match &config.arrival {
        Some(arrival) => {
            let generator = ArrivalGenerator::from_config(arrival)?;
            let shared = Arc::new(Mutex::new(pipeline));
            let (summary, injected) = run_with_arrivals(
                &runner,
                shared.clone(),
                generator,
                Duration::from_millis(run.step_delay_ms),
            )
            .await?;
            tracing::info!(injected, "随机到达投料合计");
            pipeline = shared.lock().await.clone();
            summary
        }
        None => runner.run_to_completion(&mut pipeline)?,
    };

    if !cli.quiet {
        write_completion(&mut io::stdout(), &pipeline)?;
    }
    tracing::info!(
        days_passed = summary.days_passed,
        total_time_taken = %summary.total_time_taken,
        total_work_hours = %summary.total_work_hours,
        "推演完成"
    );

    if let Some(path) = &run.export {
        export_history(&pipeline, path)
            .with_context(|| format!("导出失败 {}", path.display()))?;
    }

    Ok(())
}
