// ==========================================
// 产线流转仿真 - 导出层
// ==========================================
// 职责: 将每日快照渲染为表格 (csv/xlsx) 或报告 (json)
// 红线: 只读产线，不修改推演状态
// ==========================================

pub mod csv_exporter;
pub mod error;
pub mod json_exporter;
pub mod xlsx_exporter;

pub use csv_exporter::CsvHistoryExporter;
pub use error::{ExportError, ExportResult};
pub use json_exporter::{JsonHistoryExporter, SimulationReport, StageParameters};
pub use xlsx_exporter::XlsxHistoryExporter;

use crate::engine::pipeline::Pipeline;
use std::path::Path;

// ==========================================
// Trait: HistoryExporter
// ==========================================
pub trait HistoryExporter {
    fn export(&self, pipeline: &Pipeline, path: &Path) -> ExportResult<()>;
}

/// 历史表格表头: Day + 每工序 4 列 + 全线 3 列
pub fn history_headers(pipeline: &Pipeline) -> Vec<String> {
    let mut headers = vec!["Day".to_string()];
    for stage in pipeline.stages() {
        let name = stage.name();
        headers.push(format!("Tasks {}", name));
        headers.push(format!("Completed {}", name));
        headers.push(format!("Lead Time {}", name));
        headers.push(format!("HC {}", name));
    }
    headers.push("Remaining Tasks".to_string());
    headers.push("Remaining Time".to_string());
    headers.push("Total Time Taken So Far".to_string());
    headers
}

/// 表格末尾的汇总行 (标签, 值)
pub(crate) fn summary_rows(pipeline: &Pipeline) -> [(&'static str, String); 3] {
    [
        ("Total Time Taken (Days):", pipeline.total_time_taken()),
        ("Total Work Time (Hours Only):", pipeline.total_work_hours_only()),
        ("Workdays Elapsed:", pipeline.days_passed().to_string()),
    ]
}

/// 按扩展名选择导出器
pub fn export_history<P: AsRef<Path>>(pipeline: &Pipeline, path: P) -> ExportResult<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => CsvHistoryExporter.export(pipeline, path),
        "xlsx" => XlsxHistoryExporter.export(pipeline, path),
        "json" => JsonHistoryExporter.export(pipeline, path),
        _ => Err(ExportError::UnsupportedFormat(ext)),
    }
}
