// ==========================================
// 产线流转仿真 - 交互式参数录入
// ==========================================
// 流程: 工序数 → 逐工序 (名称/人数/工时/QA) → 首工序初始投料
// 规则: 输入非法时提示并重新询问；QA 留空取 1.0
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::simulation_config::{SimulationConfig, StageConfig};
use std::collections::HashSet;
use std::io::{BufRead, Write};

pub struct PromptSession<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSession<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// 输出提示并读取一行（已去除首尾空白）
    fn ask(&mut self, prompt: &str) -> ConfigResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConfigError::InputClosed(prompt.trim().to_string()));
        }
        Ok(line.trim().to_string())
    }

    /// 反复询问直到 `parse` 返回 Some
    fn ask_until<T>(
        &mut self,
        prompt: &str,
        hint: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> ConfigResult<T> {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Some(value) => return Ok(value),
                None => writeln!(self.output, "输入无效: {}", hint)?,
            }
        }
    }

    /// 录入完整仿真配置
    pub fn collect_config(&mut self) -> ConfigResult<SimulationConfig> {
        let count = self.ask_until("Enter the number of stages: ", "请输入正整数", |s| {
            s.parse::<usize>().ok().filter(|n| *n > 0)
        })?;

        let mut stages = Vec::with_capacity(count);
        let mut names = HashSet::new();
        for i in 1..=count {
            let name = self.ask_until(
                &format!("Enter the name for stage {}: ", i),
                "名称不能为空且不能重复",
                |s| (!s.is_empty() && !names.contains(s)).then(|| s.to_string()),
            )?;
            names.insert(name.clone());

            let headcount = self.ask_until(
                &format!("Enter the headcount for stage {}: ", i),
                "请输入正整数",
                |s| s.parse::<u32>().ok().filter(|n| *n > 0),
            )?;

            let lead_time = self.ask_until(
                &format!("Enter the lead time (minutes per task) for stage {}: ", i),
                "请输入正数",
                |s| s.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0),
            )?;

            let qa_rate = self.ask_until(
                &format!("Enter the QA rate for stage {} (default is 1.0): ", i),
                "请输入 (0, 1] 之间的小数",
                |s| {
                    if s.is_empty() {
                        return Some(1.0);
                    }
                    s.parse::<f64>().ok().filter(|v| *v > 0.0 && *v <= 1.0)
                },
            )?;

            stages.push(StageConfig::new(name, headcount, lead_time, qa_rate));
        }

        let initial_tasks = self.ask_until(
            "Enter the initial number of tasks for the first stage: ",
            "请输入非负数",
            |s| s.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0),
        )?;

        let config = SimulationConfig::new(stages, initial_tasks);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_collect_config_with_defaults() {
        let input = "2\nL0\n40\n30\n0.8\nL1\n10\n45\n\n100\n";
        let mut output = Vec::new();
        let config = PromptSession::new(Cursor::new(input), &mut output)
            .collect_config()
            .unwrap();

        assert_eq!(config.stages.len(), 2);
        assert_eq!(config.stages[0], StageConfig::new("L0", 40, 30.0, 0.8));
        assert_eq!(config.stages[1].qa_rate, 1.0);
        assert_eq!(config.initial_tasks, 100.0);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Enter the name for stage 2: "));
    }

    #[test]
    fn test_invalid_answers_are_reprompted() {
        // 工序数 0 → 重问；人数 abc → 重问；QA 1.5 → 重问
        let input = "0\n1\nL0\nabc\n5\n60\n1.5\n0.9\n25\n";
        let mut output = Vec::new();
        let config = PromptSession::new(Cursor::new(input), &mut output)
            .collect_config()
            .unwrap();

        assert_eq!(config.stages, vec![StageConfig::new("L0", 5, 60.0, 0.9)]);
        assert_eq!(config.initial_tasks, 25.0);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("输入无效").count(), 3);
    }

    #[test]
    fn test_eof_reports_input_closed() {
        let mut output = Vec::new();
        let err = PromptSession::new(Cursor::new("1\nL0\n"), &mut output)
            .collect_config()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InputClosed(_)));
    }
}
