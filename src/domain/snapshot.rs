// ==========================================
// 产线流转仿真 - 每日快照
// ==========================================
// 用途: 产线每推进一日追加一条，作为导出与审计的唯一数据源
// 说明: 工序数量不固定，按工序名称索引
// ==========================================

use serde::{Deserialize, Serialize};

/// 单工序当日状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSnapshot {
    pub name: String,
    pub tasks: f64,           // 日末积压
    pub completed_tasks: f64, // 累计完工
}

/// 单日快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySnapshot {
    pub day: u32,                    // 第几日（从 1 开始）
    pub stages: Vec<StageSnapshot>,  // 按产线顺序
    pub remaining_time: String,      // 剩余时长预估
    pub total_time_taken: String,    // 截至当日累计时长
}

impl DaySnapshot {
    /// 按工序名称查找
    pub fn stage(&self, name: &str) -> Option<&StageSnapshot> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// 全线积压合计
    pub fn remaining_tasks(&self) -> f64 {
        self.stages.iter().map(|s| s.tasks).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_total() {
        let snapshot = DaySnapshot {
            day: 1,
            stages: vec![
                StageSnapshot { name: "L0".to_string(), tasks: 1.5, completed_tasks: 10.0 },
                StageSnapshot { name: "L1".to_string(), tasks: 2.0, completed_tasks: 4.0 },
            ],
            remaining_time: "0d:1h:0m".to_string(),
            total_time_taken: "0d:6h:30m".to_string(),
        };

        assert_eq!(snapshot.stage("L1").map(|s| s.completed_tasks), Some(4.0));
        assert!(snapshot.stage("L9").is_none());
        assert_eq!(snapshot.remaining_tasks(), 3.5);
    }
}
