// ==========================================
// 产线流转仿真 - 应用层
// ==========================================
// 职责: 交互式录入、控制台进度输出（命令行入口调用）
// ==========================================

pub mod console;
pub mod interactive;

pub use console::{write_completion, write_initial_state, ConsoleReporter};
pub use interactive::PromptSession;
