// ==========================================
// 产线流转仿真 - 推演报告导出 (JSON)
// ==========================================

use crate::domain::snapshot::DaySnapshot;
use crate::engine::pipeline::Pipeline;
use crate::engine::runner::RunSummary;
use crate::export::error::ExportResult;
use crate::export::HistoryExporter;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use uuid::Uuid;

/// 工序参数（报告用）
#[derive(Debug, Clone, Serialize)]
pub struct StageParameters {
    pub name: String,
    pub headcount: u32,
    pub lead_time: f64,
    pub qa_rate: f64,
}

/// 推演报告
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub work_minutes_per_day: u32,
    pub stages: Vec<StageParameters>,
    pub daily_data: Vec<DaySnapshot>,
    pub summary: RunSummary,
}

impl SimulationReport {
    pub fn from_pipeline(pipeline: &Pipeline) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            work_minutes_per_day: pipeline.work_minutes_per_day(),
            stages: pipeline
                .stages()
                .iter()
                .map(|s| StageParameters {
                    name: s.name().to_string(),
                    headcount: s.headcount(),
                    lead_time: s.lead_time(),
                    qa_rate: s.qa_rate(),
                })
                .collect(),
            daily_data: pipeline.daily_data().to_vec(),
            summary: RunSummary::from_pipeline(pipeline),
        }
    }
}

pub struct JsonHistoryExporter;

impl JsonHistoryExporter {
    pub fn write_to<W: Write>(&self, pipeline: &Pipeline, writer: W) -> ExportResult<()> {
        let report = SimulationReport::from_pipeline(pipeline);
        serde_json::to_writer_pretty(writer, &report)?;
        Ok(())
    }
}

impl HistoryExporter for JsonHistoryExporter {
    fn export(&self, pipeline: &Pipeline, path: &Path) -> ExportResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(pipeline, &mut writer)?;
        writer.flush()?;
        tracing::info!(path = %path.display(), "推演报告导出完成");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stage::Stage;

    #[test]
    fn test_report_contains_history_and_summary() {
        let mut l0 = Stage::with_qa_rate("L0", 5, 60.0, 0.8).unwrap();
        l0.add_tasks(25.0);
        let mut pipeline = Pipeline::new(vec![l0, Stage::new("L1", 2, 60.0).unwrap()]).unwrap();
        pipeline.work_one_day();
        pipeline.work_one_day();

        let mut buf = Vec::new();
        JsonHistoryExporter.write_to(&pipeline, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["work_minutes_per_day"], 390);
        assert_eq!(value["stages"][0]["qa_rate"], 0.8);
        assert_eq!(value["daily_data"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(value["daily_data"][0]["stages"][1]["name"], "L1");
        assert_eq!(value["summary"]["days_passed"], 2);
        assert!(value["run_id"].as_str().is_some());
    }
}
