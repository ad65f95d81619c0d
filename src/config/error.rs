// ==========================================
// 产线流转仿真 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 覆盖: 工序参数校验 / 工序表文件解析 / JSON 配置解析
// ==========================================

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 工序参数错误 =====
    #[error("工序名称为空 (序号 {index})")]
    EmptyStageName { index: usize },

    #[error("工序名称为空")]
    BlankStageName,

    #[error("工序 {stage} 人数必须为正整数，实际 {value}")]
    InvalidHeadcount { stage: String, value: i64 },

    #[error("工序 {stage} 单件工时必须为正数，实际 {value}")]
    InvalidLeadTime { stage: String, value: f64 },

    #[error("工序 {stage} QA 合格率必须位于 (0, 1]，实际 {value}")]
    InvalidQaRate { stage: String, value: f64 },

    #[error("产线至少需要一个工序")]
    EmptyPipeline,

    #[error("工序名称重复: {0}")]
    DuplicateStageName(String),

    // ===== 仿真参数错误 =====
    #[error("每日工作分钟数必须为正整数，实际 {0}")]
    InvalidWorkday(i64),

    #[error("初始任务数必须为非负有限数，实际 {0}")]
    InvalidTaskCount(f64),

    #[error("最大仿真天数必须为正整数，实际 {0}")]
    InvalidMaxDays(i64),

    #[error("到达生成器参数错误: {0}")]
    InvalidArrival(String),

    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .json/.csv/.xlsx/.xls）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    // ===== 数据映射错误 =====
    #[error("必填列缺失: {0}")]
    MissingColumn(String),

    #[error("交互输入意外结束: {0}")]
    InputClosed(String),

    #[error("类型转换失败 (行 {row}, 字段 {field}): {value}")]
    TypeConversionError {
        row: usize,
        field: String,
        value: String,
    },
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ConfigError {
    fn from(err: csv::Error) -> Self {
        ConfigError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ConfigError {
    fn from(err: calamine::Error) -> Self {
        ConfigError::ExcelParseError(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::JsonParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
