// ==========================================
// 产线流转仿真 - 控制台进度输出
// ==========================================

use crate::engine::events::{SimulationEvent, SimulationEventPublisher};
use crate::engine::pipeline::Pipeline;
use std::io::{self, Write};
use std::sync::Mutex;

/// 输出单日进度块
pub fn write_day_block<W: Write>(
    out: &mut W,
    day: u32,
    stages: impl IntoIterator<Item = (String, f64, f64)>,
    remaining_time: &str,
) -> io::Result<()> {
    writeln!(out, "--- Day {} ---", day)?;
    for (name, tasks, completed) in stages {
        writeln!(
            out,
            "{}: {:.2} tasks remaining, {:.2} tasks completed",
            name, tasks, completed
        )?;
    }
    writeln!(out, "Estimated remaining time: {}", remaining_time)?;
    writeln!(out)
}

/// 输出初始状态（第 0 日）
pub fn write_initial_state<W: Write>(out: &mut W, pipeline: &Pipeline) -> io::Result<()> {
    write_day_block(
        out,
        pipeline.days_passed(),
        pipeline
            .stages()
            .iter()
            .map(|s| (s.name().to_string(), s.tasks(), s.completed_tasks())),
        &pipeline.remaining_time(),
    )
}

/// 输出完成汇总
pub fn write_completion<W: Write>(out: &mut W, pipeline: &Pipeline) -> io::Result<()> {
    writeln!(out, "All tasks have been completed!")?;
    writeln!(out, "Total Time Taken: {}", pipeline.total_time_taken())?;
    writeln!(out, "Total Work Time (Hours Only): {}", pipeline.total_work_hours_only())?;
    writeln!(out, "Workdays Elapsed: {}", pipeline.days_passed())?;
    writeln!(
        out,
        "Delivered: {:.2}, Scrapped: {:.2}",
        pipeline.delivered_tasks(),
        pipeline.scrapped_tasks()
    )
}

// ==========================================
// ConsoleReporter - 逐日进度事件发布者
// ==========================================
pub struct ConsoleReporter<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> SimulationEventPublisher for ConsoleReporter<W> {
    fn publish(&self, event: SimulationEvent) {
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(e) => {
                tracing::warn!("控制台输出锁获取失败: {}", e);
                return;
            }
        };

        let result = match event {
            SimulationEvent::DayCompleted {
                day,
                stages,
                remaining_time,
                ..
            } => write_day_block(
                &mut *out,
                day,
                stages
                    .into_iter()
                    .map(|s| (s.name, s.tasks, s.completed_tasks)),
                &remaining_time,
            ),
            SimulationEvent::TasksArrived { count } => {
                writeln!(out, "New tasks arriving: {} tasks added to the first stage.", count)
            }
            SimulationEvent::PipelineCompleted { .. } => Ok(()),
        };

        if let Err(e) = result {
            tracing::warn!("控制台输出失败: {}", e);
        }
    }
}
