// ==========================================
// 产线流转仿真 - 配置层
// ==========================================
// 职责: 仿真配置加载、校验、环境变量覆写
// 来源: JSON 配置文件 / 工序表 (csv/xlsx) / 交互输入
// ==========================================

pub mod error;
pub mod simulation_config;
pub mod stage_loader;

// 重导出核心配置
pub use error::{ConfigError, ConfigResult};
pub use simulation_config::{
    config_keys, parse_work_minutes, ArrivalConfig, SimulationConfig, StageConfig,
    DEFAULT_MAX_DAYS, DEFAULT_WORK_MINUTES_PER_DAY,
};
pub use stage_loader::{CsvStageReader, ExcelStageReader, StageTableReader, UniversalStageReader};
