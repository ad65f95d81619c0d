// ==========================================
// 产线流转仿真 - 核心库
// ==========================================
// 定位: 多工序产线的离散日推演，预估完工时间与各工序积压
// 模型: 人数 × 工时决定单日产能，QA 合格部分当日流向下一工序
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 工序、快照、时长换算
pub mod domain;

// 引擎层 - 产线推演、驱动、随机到达
pub mod engine;

// 配置层 - 仿真参数与工序表
pub mod config;

// 导出层 - 历史表格 / 报告
pub mod export;

// 应用层 - 交互录入与控制台输出
pub mod app;

// 命令行参数
pub mod cli;

// 日志系统
pub mod logging;

// 性能日志
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{ArrivalConfig, ConfigError, SimulationConfig, StageConfig};
pub use domain::{CalendarSpan, DaySnapshot, Stage, StageSnapshot, WorkHours};
pub use engine::{
    ArrivalGenerator, Pipeline, RunSummary, SimulationError, SimulationEvent, SimulationRunner,
};
pub use export::{export_history, ExportError, HistoryExporter};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产线流转仿真";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
