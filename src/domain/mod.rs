// ==========================================
// 产线流转仿真 - 领域模型层
// ==========================================
// 职责: 定义工序实体、每日快照、时长换算
// 红线: 不含驱动循环，不含文件读写
// ==========================================

pub mod snapshot;
pub mod stage;
pub mod time_span;

// 重导出核心类型
pub use snapshot::{DaySnapshot, StageSnapshot};
pub use stage::Stage;
pub use time_span::{CalendarSpan, WorkHours};
