// ==========================================
// 产线流转仿真 - 引擎层事件发布
// ==========================================
// 职责: 定义仿真事件发布 trait，驱动循环只依赖 trait
// 实现: 空操作 / 日志输出 / 内存收集
// ==========================================

use crate::domain::snapshot::StageSnapshot;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

// ==========================================
// 仿真事件
// ==========================================

/// 仿真事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimulationEvent {
    /// 一个工作日推进完成
    DayCompleted {
        day: u32,
        stages: Vec<StageSnapshot>,
        remaining_tasks: f64,
        remaining_time: String,
    },
    /// 首工序新到达任务
    TasksArrived { count: u32 },
    /// 所有工序积压清零
    PipelineCompleted {
        days_passed: u32,
        total_time_taken: String,
    },
}

impl SimulationEvent {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &str {
        match self {
            SimulationEvent::DayCompleted { .. } => "DayCompleted",
            SimulationEvent::TasksArrived { .. } => "TasksArrived",
            SimulationEvent::PipelineCompleted { .. } => "PipelineCompleted",
        }
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 仿真事件发布者
///
/// 发布失败不影响推演，由实现方自行记录
pub trait SimulationEventPublisher: Send + Sync {
    fn publish(&self, event: SimulationEvent);
}

/// 空操作事件发布者
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl SimulationEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: SimulationEvent) {
        tracing::trace!(event_type = event.as_str(), "NoOpEventPublisher: 跳过事件");
    }
}

/// 日志事件发布者
#[derive(Debug, Clone, Default)]
pub struct LoggingEventPublisher;

impl SimulationEventPublisher for LoggingEventPublisher {
    fn publish(&self, event: SimulationEvent) {
        match &event {
            SimulationEvent::DayCompleted {
                day,
                remaining_tasks,
                remaining_time,
                ..
            } => tracing::info!(
                day,
                remaining_tasks = *remaining_tasks,
                remaining_time = %remaining_time,
                "工作日完成"
            ),
            SimulationEvent::TasksArrived { count } => {
                tracing::info!(count, "新任务到达首工序")
            }
            SimulationEvent::PipelineCompleted {
                days_passed,
                total_time_taken,
            } => tracing::info!(
                days_passed,
                total_time_taken = %total_time_taken,
                "全部任务完成"
            ),
        }
    }
}

/// 内存收集事件发布者（测试与事后检查）
#[derive(Debug, Clone, Default)]
pub struct CollectingEventPublisher {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl CollectingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已收集事件的副本
    pub fn events(&self) -> Vec<SimulationEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl SimulationEventPublisher for CollectingEventPublisher {
    fn publish(&self, event: SimulationEvent) {
        match self.events.lock() {
            Ok(mut guard) => guard.push(event),
            Err(e) => tracing::warn!("事件收集锁获取失败: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_publisher_keeps_order() {
        let publisher = CollectingEventPublisher::new();
        publisher.publish(SimulationEvent::TasksArrived { count: 3 });
        publisher.publish(SimulationEvent::PipelineCompleted {
            days_passed: 2,
            total_time_taken: "0d:13h:0m".to_string(),
        });

        let events = publisher.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].as_str(), "TasksArrived");
        assert_eq!(events[1].as_str(), "PipelineCompleted");
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_value(SimulationEvent::TasksArrived { count: 5 }).unwrap();
        assert_eq!(json["type"], "TasksArrived");
        assert_eq!(json["count"], 5);
    }
}
