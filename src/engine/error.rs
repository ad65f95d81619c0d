// ==========================================
// 产线流转仿真 - 引擎层错误类型
// ==========================================

use crate::config::error::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("仿真超过最大天数 {max_days} 仍未完成（剩余积压 {remaining_tasks:.2}）")]
    DayLimitExceeded { max_days: u32, remaining_tasks: f64 },

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("到达生成任务异常退出: {0}")]
    ArrivalTask(String),
}

impl From<tokio::task::JoinError> for SimulationError {
    fn from(err: tokio::task::JoinError) -> Self {
        SimulationError::ArrivalTask(err.to_string())
    }
}

/// Result 类型别名
pub type SimulationResult<T> = Result<T, SimulationError>;
