// ==========================================
// 产线流转仿真 - 产线推演引擎
// ==========================================
// 职责: 按工序顺序推进工作日、剩余时长预估、历史快照
// 红线: 工序严格按序处理（同日可逐级流转），顺序不可调换
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::simulation_config::DEFAULT_WORK_MINUTES_PER_DAY;
use crate::domain::snapshot::{DaySnapshot, StageSnapshot};
use crate::domain::stage::Stage;
use crate::domain::time_span::{CalendarSpan, WorkHours};
use tracing::instrument;

// ==========================================
// Pipeline - 产线
// ==========================================
#[derive(Debug, Clone)]
pub struct Pipeline {
    stages: Vec<Stage>,
    work_minutes_per_day: u32,

    // ===== 推演进度 =====
    days_passed: u32,
    total_work_minutes: u64,
    daily_data: Vec<DaySnapshot>,

    // ===== 流量台账 =====
    injected_tasks: f64,  // 累计投料（含构造时首工序预置）
    scrapped_tasks: f64,  // QA 报废
    delivered_tasks: f64, // 末工序放行产出
}

impl Pipeline {
    /// 使用默认工作日长度（390 分钟）创建产线
    pub fn new(stages: Vec<Stage>) -> ConfigResult<Self> {
        Self::with_workday(stages, DEFAULT_WORK_MINUTES_PER_DAY)
    }

    /// 创建产线
    ///
    /// # 参数
    /// - `stages`: 按产线顺序排列的工序（首工序可已预置投料）
    /// - `work_minutes_per_day`: 每日工作分钟数，推进与预估共用
    pub fn with_workday(stages: Vec<Stage>, work_minutes_per_day: u32) -> ConfigResult<Self> {
        if stages.is_empty() {
            return Err(ConfigError::EmptyPipeline);
        }
        if work_minutes_per_day == 0 {
            return Err(ConfigError::InvalidWorkday(0));
        }

        let injected_tasks = stages.iter().map(Stage::tasks).sum();

        Ok(Self {
            stages,
            work_minutes_per_day,
            days_passed: 0,
            total_work_minutes: 0,
            daily_data: Vec::new(),
            injected_tasks,
            scrapped_tasks: 0.0,
            delivered_tasks: 0.0,
        })
    }

    // ==========================================
    // 只读访问
    // ==========================================

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn work_minutes_per_day(&self) -> u32 {
        self.work_minutes_per_day
    }

    pub fn days_passed(&self) -> u32 {
        self.days_passed
    }

    pub fn total_work_minutes(&self) -> u64 {
        self.total_work_minutes
    }

    pub fn daily_data(&self) -> &[DaySnapshot] {
        &self.daily_data
    }

    pub fn injected_tasks(&self) -> f64 {
        self.injected_tasks
    }

    pub fn scrapped_tasks(&self) -> f64 {
        self.scrapped_tasks
    }

    pub fn delivered_tasks(&self) -> f64 {
        self.delivered_tasks
    }

    /// 全线积压合计
    pub fn remaining_tasks(&self) -> f64 {
        self.stages.iter().map(Stage::tasks).sum()
    }

    // ==========================================
    // 状态变更
    // ==========================================

    /// 首工序投料（随机到达等外部来源的唯一入口）
    pub fn inject_tasks(&mut self, count: f64) {
        self.stages[0].add_tasks(count);
        self.injected_tasks += count;
    }

    /// 推进一个工作日
    ///
    /// 工序 i 的放行量当日即进入工序 i+1，下游仍受自身当日产能约束
    #[instrument(skip(self), fields(day = self.days_passed + 1))]
    pub fn work_one_day(&mut self) {
        let minutes = self.work_minutes_per_day;
        let last = self.stages.len() - 1;

        for i in 0..self.stages.len() {
            let before = self.stages[i].completed_tasks();
            let passed = self.stages[i].work_one_day(minutes);
            let done = self.stages[i].completed_tasks() - before;

            self.scrapped_tasks += done - passed;
            if i < last {
                self.stages[i + 1].add_tasks(passed);
            } else {
                self.delivered_tasks += passed;
            }
        }

        self.days_passed += 1;
        self.total_work_minutes += minutes as u64;

        let snapshot = self.collect_daily_data();
        tracing::debug!(
            remaining_tasks = snapshot.remaining_tasks(),
            remaining_time = %snapshot.remaining_time,
            "工作日推进完成"
        );
        self.daily_data.push(snapshot);
    }

    // ==========================================
    // 投影（只读）
    // ==========================================

    /// 所有工序积压为 0
    pub fn is_complete(&self) -> bool {
        self.stages.iter().all(|s| s.tasks() == 0.0)
    }

    /// 剩余天数预估：各工序独立消化积压所需天数之和（串行、偏保守）
    pub fn remaining_days(&self) -> f64 {
        self.stages
            .iter()
            .filter(|s| s.tasks() > 0.0)
            .map(|s| s.days_to_drain(self.work_minutes_per_day))
            .sum()
    }

    /// 剩余时长 "{d}d:{h}h:{m}m"
    pub fn remaining_time(&self) -> String {
        CalendarSpan::from_fractional_days(self.remaining_days()).to_string()
    }

    /// 累计时长 "{d}d:{h}h:{m}m"（工作分钟按 24 小时日历换算展示）
    pub fn total_time_taken(&self) -> String {
        let total_minutes = self.days_passed as u64 * self.work_minutes_per_day as u64;
        CalendarSpan::from_minutes(total_minutes).to_string()
    }

    /// 纯工时 "{h}h:{m}m"
    pub fn total_work_hours_only(&self) -> String {
        WorkHours::from_minutes(self.total_work_minutes).to_string()
    }

    fn collect_daily_data(&self) -> DaySnapshot {
        DaySnapshot {
            day: self.days_passed,
            stages: self
                .stages
                .iter()
                .map(|s| StageSnapshot {
                    name: s.name().to_string(),
                    tasks: s.tasks(),
                    completed_tasks: s.completed_tasks(),
                })
                .collect(),
            remaining_time: self.remaining_time(),
            total_time_taken: self.total_time_taken(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(name: &str, headcount: u32, lead_time: f64, qa_rate: f64) -> Stage {
        Stage::with_qa_rate(name, headcount, lead_time, qa_rate).unwrap()
    }

    #[test]
    fn test_same_day_cascade() {
        let mut l0 = stage("L0", 5, 60.0, 0.8);
        l0.add_tasks(25.0);
        let mut pipeline = Pipeline::new(vec![l0, stage("L1", 2, 60.0, 1.0)]).unwrap();

        pipeline.work_one_day();

        let stages = pipeline.stages();
        assert_eq!(stages[0].tasks(), 0.0);
        assert_eq!(stages[0].completed_tasks(), 25.0);
        // L1 当日收到 20，自身产能 13
        assert!((stages[1].tasks() - 7.0).abs() < 1e-9);
        assert!((stages[1].completed_tasks() - 13.0).abs() < 1e-9);
        assert!((pipeline.scrapped_tasks() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_counters_advance_per_day() {
        let mut l0 = stage("L0", 1, 60.0, 1.0);
        l0.add_tasks(100.0);
        let mut pipeline = Pipeline::with_workday(vec![l0], 300).unwrap();

        pipeline.work_one_day();
        pipeline.work_one_day();

        assert_eq!(pipeline.days_passed(), 2);
        assert_eq!(pipeline.total_work_minutes(), 600);
        assert_eq!(pipeline.daily_data().len(), 2);
        assert_eq!(pipeline.daily_data()[1].day, 2);
        assert_eq!(pipeline.total_work_hours_only(), "10h:0m");
    }

    #[test]
    fn test_idle_day_still_consumes_calendar() {
        let mut pipeline = Pipeline::new(vec![stage("L0", 1, 60.0, 1.0)]).unwrap();
        assert!(pipeline.is_complete());

        pipeline.work_one_day();

        assert_eq!(pipeline.days_passed(), 1);
        assert_eq!(pipeline.total_work_minutes(), 390);
        assert_eq!(pipeline.total_time_taken(), "0d:6h:30m");
    }

    #[test]
    fn test_remaining_time_zero_without_backlog() {
        let pipeline = Pipeline::new(vec![stage("L0", 1, 60.0, 1.0), stage("L1", 1, 60.0, 1.0)]).unwrap();
        assert_eq!(pipeline.remaining_days(), 0.0);
        assert_eq!(pipeline.remaining_time(), "0d:0h:0m");
    }

    #[test]
    fn test_remaining_time_sums_per_stage_days() {
        // L0: 65/天, L1: 32.5/天, L2: 13/天
        let mut l0 = stage("L0", 10, 60.0, 1.0);
        l0.add_tasks(50.0);
        let mut pipeline = Pipeline::new(vec![
            l0,
            stage("L1", 5, 60.0, 1.0),
            stage("L2", 2, 60.0, 1.0),
        ])
        .unwrap();

        pipeline.work_one_day();

        // L1 剩 17.5 → 0.538 天, L2 剩 19.5 → 1.5 天
        assert!((pipeline.remaining_days() - (17.5 / 32.5 + 1.5)).abs() < 1e-9);
        assert_eq!(pipeline.remaining_time(), "2d:0h:55m");
    }

    #[test]
    fn test_inject_tasks_tracks_ledger() {
        let mut l0 = stage("L0", 1, 60.0, 1.0);
        l0.add_tasks(3.0);
        let mut pipeline = Pipeline::new(vec![l0]).unwrap();

        pipeline.inject_tasks(4.0);

        assert_eq!(pipeline.injected_tasks(), 7.0);
        assert_eq!(pipeline.stages()[0].tasks(), 7.0);
    }

    #[test]
    fn test_empty_pipeline_rejected() {
        assert!(matches!(Pipeline::new(Vec::new()), Err(ConfigError::EmptyPipeline)));
        assert!(matches!(
            Pipeline::with_workday(vec![stage("L0", 1, 1.0, 1.0)], 0),
            Err(ConfigError::InvalidWorkday(0))
        ));
    }
}
