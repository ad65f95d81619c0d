// ==========================================
// 产线流转仿真 - 推演驱动
// ==========================================
// 职责: 重复推进工作日直至完成，带最大天数保护
// 输出: RunSummary + 仿真事件
// ==========================================

use crate::config::simulation_config::DEFAULT_MAX_DAYS;
use crate::engine::error::{SimulationError, SimulationResult};
use crate::engine::events::{NoOpEventPublisher, SimulationEvent, SimulationEventPublisher};
use crate::engine::pipeline::Pipeline;
use crate::perf::PerfGuard;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// RunSummary - 推演结果汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub days_passed: u32,            // 工作日数（权威口径）
    pub total_time_taken: String,    // 日历换算展示
    pub total_work_hours: String,    // 纯工时
    pub injected_tasks: f64,         // 累计投料
    pub delivered_tasks: f64,        // 末工序放行
    pub scrapped_tasks: f64,         // QA 报废
    pub completed_by_stage: Vec<(String, f64)>,
}

impl RunSummary {
    pub fn from_pipeline(pipeline: &Pipeline) -> Self {
        Self {
            days_passed: pipeline.days_passed(),
            total_time_taken: pipeline.total_time_taken(),
            total_work_hours: pipeline.total_work_hours_only(),
            injected_tasks: pipeline.injected_tasks(),
            delivered_tasks: pipeline.delivered_tasks(),
            scrapped_tasks: pipeline.scrapped_tasks(),
            completed_by_stage: pipeline
                .stages()
                .iter()
                .map(|s| (s.name().to_string(), s.completed_tasks()))
                .collect(),
        }
    }
}

// ==========================================
// SimulationRunner - 推演驱动
// ==========================================
pub struct SimulationRunner {
    max_days: u32,
    publisher: Arc<dyn SimulationEventPublisher>,
}

impl Default for SimulationRunner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DAYS)
    }
}

impl SimulationRunner {
    pub fn new(max_days: u32) -> Self {
        Self {
            max_days,
            publisher: Arc::new(NoOpEventPublisher),
        }
    }

    /// 指定事件发布者
    pub fn with_publisher(mut self, publisher: Arc<dyn SimulationEventPublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn max_days(&self) -> u32 {
        self.max_days
    }

    pub fn publisher(&self) -> &Arc<dyn SimulationEventPublisher> {
        &self.publisher
    }

    /// 推进一个工作日并发布 DayCompleted
    pub fn step(&self, pipeline: &mut Pipeline) {
        pipeline.work_one_day();
        if let Some(snapshot) = pipeline.daily_data().last() {
            self.publisher.publish(SimulationEvent::DayCompleted {
                day: snapshot.day,
                stages: snapshot.stages.clone(),
                remaining_tasks: snapshot.remaining_tasks(),
                remaining_time: snapshot.remaining_time.clone(),
            });
        }
    }

    /// 推演至全部完成
    ///
    /// # 返回
    /// - Ok(RunSummary): 已完成（投料为 0 时不推进任何一天）
    /// - Err(DayLimitExceeded): 推进天数达到 max_days 仍未完成
    #[instrument(skip(self, pipeline), fields(stages = pipeline.stages().len(), max_days = self.max_days))]
    pub fn run_to_completion(&self, pipeline: &mut Pipeline) -> SimulationResult<RunSummary> {
        let mut perf = PerfGuard::new("run_to_completion");
        let start_day = pipeline.days_passed();

        while !pipeline.is_complete() {
            if pipeline.days_passed() - start_day >= self.max_days {
                return Err(SimulationError::DayLimitExceeded {
                    max_days: self.max_days,
                    remaining_tasks: pipeline.remaining_tasks(),
                });
            }
            self.step(pipeline);
        }

        perf.set_days(pipeline.days_passed() - start_day);
        self.finish(pipeline)
    }

    /// 发布完成事件并汇总
    pub(crate) fn finish(&self, pipeline: &Pipeline) -> SimulationResult<RunSummary> {
        self.publisher.publish(SimulationEvent::PipelineCompleted {
            days_passed: pipeline.days_passed(),
            total_time_taken: pipeline.total_time_taken(),
        });
        Ok(RunSummary::from_pipeline(pipeline))
    }
}
