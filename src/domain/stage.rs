// ==========================================
// 产线流转仿真 - 工序领域模型
// ==========================================
// 职责: 工序积压、完工计数、单日产能与 QA 放行
// 红线: 单日完工量不超过当前积压；完工计数只增不减
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::Serialize;

// ==========================================
// Stage - 工序
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    // ===== 工序参数（创建后不变）=====
    name: String,      // 工序名称
    headcount: u32,    // 人数
    lead_time: f64,    // 单人单件工时 (分钟)
    qa_rate: f64,      // QA 合格率 (0, 1]

    // ===== 运行状态 =====
    tasks: f64,           // 当前积压
    completed_tasks: f64, // 累计完工（QA 前）
}

impl Stage {
    /// 创建工序（QA 合格率默认 1.0）
    pub fn new(name: impl Into<String>, headcount: u32, lead_time: f64) -> ConfigResult<Self> {
        Self::with_qa_rate(name, headcount, lead_time, 1.0)
    }

    /// 创建工序并指定 QA 合格率
    ///
    /// # 错误
    /// - 人数为 0
    /// - 工时非正或非有限数
    /// - QA 合格率不在 (0, 1]
    pub fn with_qa_rate(
        name: impl Into<String>,
        headcount: u32,
        lead_time: f64,
        qa_rate: f64,
    ) -> ConfigResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::BlankStageName);
        }
        if headcount == 0 {
            return Err(ConfigError::InvalidHeadcount {
                stage: name,
                value: 0,
            });
        }
        if !lead_time.is_finite() || lead_time <= 0.0 {
            return Err(ConfigError::InvalidLeadTime {
                stage: name,
                value: lead_time,
            });
        }
        if !(qa_rate > 0.0 && qa_rate <= 1.0) {
            return Err(ConfigError::InvalidQaRate {
                stage: name,
                value: qa_rate,
            });
        }

        Ok(Self {
            name,
            headcount,
            lead_time,
            qa_rate,
            tasks: 0.0,
            completed_tasks: 0.0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headcount(&self) -> u32 {
        self.headcount
    }

    pub fn lead_time(&self) -> f64 {
        self.lead_time
    }

    pub fn qa_rate(&self) -> f64 {
        self.qa_rate
    }

    pub fn tasks(&self) -> f64 {
        self.tasks
    }

    pub fn completed_tasks(&self) -> f64 {
        self.completed_tasks
    }

    // ==========================================
    // 产能计算
    // ==========================================

    /// 单日产能 = 人数 × (每日工作分钟 / 单件工时)
    pub fn capacity_per_day(&self, work_minutes_per_day: u32) -> f64 {
        self.headcount as f64 * (work_minutes_per_day as f64 / self.lead_time)
    }

    /// 仅凭本工序产能消化当前积压所需天数（积压为 0 时不做除法）
    pub fn days_to_drain(&self, work_minutes_per_day: u32) -> f64 {
        if self.tasks <= 0.0 {
            return 0.0;
        }
        self.tasks / self.capacity_per_day(work_minutes_per_day)
    }

    // ==========================================
    // 状态变更
    // ==========================================

    /// 推进一个工作日
    ///
    /// # 返回
    /// 经 QA 放行、交给下一工序的数量（不回写本工序状态）
    pub fn work_one_day(&mut self, work_minutes_per_day: u32) -> f64 {
        let capacity = self.capacity_per_day(work_minutes_per_day);
        let done = self.tasks.min(capacity);

        self.tasks -= done;
        self.completed_tasks += done;

        done * self.qa_rate
    }

    /// 追加积压（初始投料与工序间流转的唯一入口）
    pub fn add_tasks(&mut self, count: f64) {
        debug_assert!(count.is_finite() && count >= 0.0, "add_tasks: {}", count);
        self.tasks += count;
    }
}
