// ==========================================
// 产线流转仿真 - 仿真配置
// ==========================================
// 职责: 工序参数、工作日长度、天数上限、到达生成器参数
// 存储: JSON 文件 / 工序表 (csv/xlsx)
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::stage_loader::UniversalStageReader;
use crate::domain::stage::Stage;
use crate::engine::pipeline::Pipeline;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// 默认每日工作分钟数（6.5 小时）
pub const DEFAULT_WORK_MINUTES_PER_DAY: u32 = 390;

/// 默认最大仿真天数
pub const DEFAULT_MAX_DAYS: u32 = 10_000;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    /// 环境变量: 覆写每日工作分钟数
    pub const ENV_WORK_MINUTES: &str = "LINE_FLOW_SIM_WORK_MINUTES";

    // ===== 工序表列名（含别名）=====
    pub const COL_NAME: &[&str] = &["name", "stage", "工序"];
    pub const COL_HEADCOUNT: &[&str] = &["headcount", "hc", "人数"];
    pub const COL_LEAD_TIME: &[&str] = &["lead_time", "lead time", "工时"];
    pub const COL_QA_RATE: &[&str] = &["qa_rate", "qa rate", "qa", "合格率"];
}

fn default_qa_rate() -> f64 {
    1.0
}

fn default_work_minutes() -> u32 {
    DEFAULT_WORK_MINUTES_PER_DAY
}

fn default_max_days() -> u32 {
    DEFAULT_MAX_DAYS
}

// ==========================================
// StageConfig - 单工序配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub name: String,
    pub headcount: u32,
    /// 单人单件工时（分钟）
    pub lead_time: f64,
    #[serde(default = "default_qa_rate")]
    pub qa_rate: f64,
}

impl StageConfig {
    pub fn new(name: impl Into<String>, headcount: u32, lead_time: f64, qa_rate: f64) -> Self {
        Self {
            name: name.into(),
            headcount,
            lead_time,
            qa_rate,
        }
    }

    /// 校验并构造工序
    pub fn build(&self) -> ConfigResult<Stage> {
        Stage::with_qa_rate(self.name.trim(), self.headcount, self.lead_time, self.qa_rate)
    }
}

// ==========================================
// ArrivalConfig - 随机到达生成器
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalConfig {
    /// 投料间隔（毫秒）
    pub interval_ms: u64,
    /// 单批最大任务数（批量在 [1, max_tasks] 均匀取值）
    pub max_tasks: u32,
    /// 随机种子（None 时取当前时间）
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3_000,
            max_tasks: 20,
            seed: None,
        }
    }
}

impl ArrivalConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.interval_ms == 0 {
            return Err(ConfigError::InvalidArrival("interval_ms 必须大于 0".to_string()));
        }
        if self.max_tasks == 0 {
            return Err(ConfigError::InvalidArrival("max_tasks 必须大于 0".to_string()));
        }
        Ok(())
    }
}

// ==========================================
// SimulationConfig - 仿真配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes_per_day: u32,

    #[serde(default = "default_max_days")]
    pub max_days: u32,

    /// 首工序初始投料
    #[serde(default)]
    pub initial_tasks: f64,

    pub stages: Vec<StageConfig>,

    #[serde(default)]
    pub arrival: Option<ArrivalConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            work_minutes_per_day: DEFAULT_WORK_MINUTES_PER_DAY,
            max_days: DEFAULT_MAX_DAYS,
            initial_tasks: 0.0,
            stages: Vec::new(),
            arrival: None,
        }
    }
}

impl SimulationConfig {
    /// 由工序列表与初始投料创建（其余取默认值）
    pub fn new(stages: Vec<StageConfig>, initial_tasks: f64) -> Self {
        Self {
            stages,
            initial_tasks,
            ..Self::default()
        }
    }

    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), stages = config.stages.len(), "加载仿真配置");
        Ok(config)
    }

    /// 从工序表 (csv/xlsx/xls) 加载
    pub fn from_stage_table<P: AsRef<Path>>(path: P, initial_tasks: f64) -> ConfigResult<Self> {
        let stages = UniversalStageReader.read(path)?;
        Ok(Self::new(stages, initial_tasks))
    }

    /// 应用环境变量覆写
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        if let Ok(raw) = std::env::var(config_keys::ENV_WORK_MINUTES) {
            self.work_minutes_per_day = parse_work_minutes(&raw)?;
            tracing::info!(
                work_minutes_per_day = self.work_minutes_per_day,
                "环境变量覆写工作日长度"
            );
        }
        Ok(())
    }

    /// 整体校验
    pub fn validate(&self) -> ConfigResult<()> {
        if self.work_minutes_per_day == 0 {
            return Err(ConfigError::InvalidWorkday(0));
        }
        if self.max_days == 0 {
            return Err(ConfigError::InvalidMaxDays(0));
        }
        if !self.initial_tasks.is_finite() || self.initial_tasks < 0.0 {
            return Err(ConfigError::InvalidTaskCount(self.initial_tasks));
        }
        if self.stages.is_empty() {
            return Err(ConfigError::EmptyPipeline);
        }

        let mut seen = HashSet::new();
        for (index, stage) in self.stages.iter().enumerate() {
            let name = stage.name.trim();
            if name.is_empty() {
                return Err(ConfigError::EmptyStageName { index });
            }
            if !seen.insert(name.to_string()) {
                return Err(ConfigError::DuplicateStageName(name.to_string()));
            }
        }

        if let Some(arrival) = &self.arrival {
            arrival.validate()?;
        }
        Ok(())
    }

    /// 校验并构造产线（首工序按 initial_tasks 投料）
    pub fn build_pipeline(&self) -> ConfigResult<Pipeline> {
        self.validate()?;

        let mut stages = self
            .stages
            .iter()
            .map(StageConfig::build)
            .collect::<ConfigResult<Vec<_>>>()?;

        if let Some(first) = stages.first_mut() {
            first.add_tasks(self.initial_tasks);
        }

        Pipeline::with_workday(stages, self.work_minutes_per_day)
    }
}

/// 解析工作日分钟数（环境变量原始值）
pub fn parse_work_minutes(raw: &str) -> ConfigResult<u32> {
    let minutes = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ConfigError::TypeConversionError {
            row: 0,
            field: config_keys::ENV_WORK_MINUTES.to_string(),
            value: raw.to_string(),
        })?;
    if minutes <= 0 || minutes > u32::MAX as i64 {
        return Err(ConfigError::InvalidWorkday(minutes));
    }
    Ok(minutes as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> SimulationConfig {
        SimulationConfig::new(
            vec![
                StageConfig::new("L0", 40, 30.0, 0.8),
                StageConfig::new("L1", 10, 45.0, 1.0),
                StageConfig::new("L2", 5, 60.0, 1.0),
            ],
            100.0,
        )
    }

    #[test]
    fn test_json_defaults() {
        let raw = r#"{
            "initial_tasks": 50,
            "stages": [
                {"name": "L0", "headcount": 4, "lead_time": 30},
                {"name": "L1", "headcount": 2, "lead_time": 45, "qa_rate": 0.9}
            ]
        }"#;
        let config: SimulationConfig = serde_json::from_str(raw).unwrap();

        assert_eq!(config.work_minutes_per_day, DEFAULT_WORK_MINUTES_PER_DAY);
        assert_eq!(config.max_days, DEFAULT_MAX_DAYS);
        assert_eq!(config.stages[0].qa_rate, 1.0);
        assert_eq!(config.stages[1].qa_rate, 0.9);
        assert!(config.arrival.is_none());
    }

    #[test]
    fn test_build_pipeline_seeds_first_stage() {
        let pipeline = sample_config().build_pipeline().unwrap();

        assert_eq!(pipeline.stages().len(), 3);
        assert_eq!(pipeline.stages()[0].tasks(), 100.0);
        assert_eq!(pipeline.stages()[1].tasks(), 0.0);
        assert_eq!(pipeline.work_minutes_per_day(), DEFAULT_WORK_MINUTES_PER_DAY);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = sample_config();
        config.work_minutes_per_day = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWorkday(0))));

        let mut config = sample_config();
        config.initial_tasks = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTaskCount(_))));

        let mut config = sample_config();
        config.stages[2].name = "L0".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateStageName(_))));

        let mut config = sample_config();
        config.stages[2].name = " ".to_string();
        assert!(matches!(
            config.build_pipeline(),
            Err(ConfigError::EmptyStageName { index: 2 })
        ));

        let mut config = sample_config();
        config.stages.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPipeline)));

        let mut config = sample_config();
        config.stages[1].qa_rate = 1.5;
        assert!(matches!(config.build_pipeline(), Err(ConfigError::InvalidQaRate { .. })));

        let mut config = sample_config();
        config.arrival = Some(ArrivalConfig {
            interval_ms: 0,
            ..ArrivalConfig::default()
        });
        assert!(matches!(config.validate(), Err(ConfigError::InvalidArrival(_))));
    }

    #[test]
    fn test_parse_work_minutes() {
        assert_eq!(parse_work_minutes("480").unwrap(), 480);
        assert_eq!(parse_work_minutes(" 390\n").unwrap(), 390);

        assert!(matches!(parse_work_minutes("0"), Err(ConfigError::InvalidWorkday(0))));
        assert!(matches!(parse_work_minutes("-30"), Err(ConfigError::InvalidWorkday(-30))));
        assert!(matches!(
            parse_work_minutes("eight hours"),
            Err(ConfigError::TypeConversionError { field, .. }) if field == config_keys::ENV_WORK_MINUTES
        ));
    }

    #[test]
    fn test_apply_env_overrides_sets_workday() {
        // 本进程内只有此测试读写该变量
        std::env::set_var(config_keys::ENV_WORK_MINUTES, "450");
        let mut config = sample_config();
        let result = config.apply_env_overrides();
        std::env::remove_var(config_keys::ENV_WORK_MINUTES);

        result.unwrap();
        assert_eq!(config.work_minutes_per_day, 450);
        assert_eq!(config.build_pipeline().unwrap().work_minutes_per_day(), 450);
    }
}
