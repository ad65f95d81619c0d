// ==========================================
// 产线流转仿真 - 引擎层
// ==========================================
// 职责: 产线逐日推演、推演驱动、事件发布、随机到达
// 红线: 单个工作日内工序严格按序处理，投料不得穿插其中
// ==========================================

pub mod arrival;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod runner;

// 重导出核心引擎
pub use arrival::{run_with_arrivals, ArrivalGenerator, SharedPipeline, SimpleRng};
pub use error::{SimulationError, SimulationResult};
pub use events::{
    CollectingEventPublisher, LoggingEventPublisher, NoOpEventPublisher, SimulationEvent,
    SimulationEventPublisher,
};
pub use pipeline::Pipeline;
pub use runner::{RunSummary, SimulationRunner};
