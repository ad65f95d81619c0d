// ==========================================
// 产线流转仿真 - 历史表格导出 (CSV)
// ==========================================
// 布局: 每日一行；每个工序 4 列（积压/完工/工时/人数）
// 末尾: 汇总行，标签位于 "Remaining Tasks" 列
// ==========================================

use crate::engine::pipeline::Pipeline;
use crate::export::error::ExportResult;
use crate::export::{history_headers, summary_rows, HistoryExporter};
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub struct CsvHistoryExporter;

impl CsvHistoryExporter {
    /// 写出到任意 Writer
    pub fn write_to<W: Write>(&self, pipeline: &Pipeline, writer: W) -> ExportResult<()> {
        let headers = history_headers(pipeline);
        let width = headers.len();
        let mut out = WriterBuilder::new().from_writer(writer);

        out.write_record(&headers)?;

        for data in pipeline.daily_data() {
            let mut row = Vec::with_capacity(width);
            row.push(data.day.to_string());
            for (snapshot, stage) in data.stages.iter().zip(pipeline.stages()) {
                row.push(format!("{:.2}", snapshot.tasks));
                row.push(format!("{:.2}", snapshot.completed_tasks));
                row.push(stage.lead_time().to_string());
                row.push(stage.headcount().to_string());
            }
            row.push(format!("{:.2}", data.remaining_tasks()));
            row.push(data.remaining_time.clone());
            row.push(data.total_time_taken.clone());
            out.write_record(&row)?;
        }

        // 汇总行：标签列 = Remaining Tasks 列
        let label_col = width - 3;
        for (label, value) in summary_rows(pipeline) {
            let mut row = vec![String::new(); width];
            row[label_col] = label.to_string();
            row[label_col + 1] = value;
            out.write_record(&row)?;
        }

        out.flush()?;
        Ok(())
    }
}

impl HistoryExporter for CsvHistoryExporter {
    fn export(&self, pipeline: &Pipeline, path: &Path) -> ExportResult<()> {
        let file = File::create(path)?;
        self.write_to(pipeline, file)?;
        tracing::info!(
            path = %path.display(),
            rows = pipeline.daily_data().len(),
            "历史表格导出完成"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stage::Stage;

    fn finished_pipeline() -> Pipeline {
        let mut l0 = Stage::new("L0", 5, 60.0).unwrap();
        l0.add_tasks(25.0);
        let mut pipeline = Pipeline::new(vec![l0, Stage::new("L1", 2, 60.0).unwrap()]).unwrap();
        while !pipeline.is_complete() {
            pipeline.work_one_day();
        }
        pipeline
    }

    #[test]
    fn test_headers_scale_with_stage_count() {
        let headers = history_headers(&finished_pipeline());
        assert_eq!(headers.len(), 1 + 4 * 2 + 3);
        assert_eq!(headers[1], "Tasks L0");
        assert_eq!(headers[8], "HC L1");
        assert_eq!(headers[9], "Remaining Tasks");
    }

    #[test]
    fn test_rows_and_summary() {
        let pipeline = finished_pipeline();
        let mut buf = Vec::new();
        CsvHistoryExporter.write_to(&pipeline, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        // 表头 + 每日一行 + 3 行汇总
        assert_eq!(lines.len(), 1 + pipeline.days_passed() as usize + 3);
        // 第 1 日: L0 清零完工 25, L1 收 25 完成 13
        assert_eq!(lines[1], "1,0.00,25.00,60,5,12.00,13.00,60,2,12.00,0d:22h:9m,0d:6h:30m");
        assert!(lines[lines.len() - 3].ends_with(",Total Time Taken (Days):,0d:13h:0m,"));
        assert!(lines[lines.len() - 2].ends_with(",Total Work Time (Hours Only):,13h:0m,"));
        assert!(lines[lines.len() - 1].ends_with(",Workdays Elapsed:,2,"));
    }
}
