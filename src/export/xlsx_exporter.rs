// ==========================================
// 产线流转仿真 - 历史表格导出 (Excel)
// ==========================================
// 布局: 与 CSV 一致；数量列写为数值单元格，时长列写为文本
// 末尾: 汇总行，标签位于 "Remaining Tasks" 列
// ==========================================

use crate::engine::pipeline::Pipeline;
use crate::export::error::ExportResult;
use crate::export::{history_headers, summary_rows, HistoryExporter};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

const SHEET_NAME: &str = "Progress";

pub struct XlsxHistoryExporter;

impl XlsxHistoryExporter {
    /// 构建工作簿（不落盘）
    pub fn build_workbook(&self, pipeline: &Pipeline) -> ExportResult<Workbook> {
        let headers = history_headers(pipeline);
        let width = headers.len();

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, header.as_str())?;
        }

        let mut row: u32 = 1;
        for data in pipeline.daily_data() {
            let mut col: u16 = 0;
            sheet.write_number(row, col, data.day)?;
            for (snapshot, stage) in data.stages.iter().zip(pipeline.stages()) {
                sheet.write_number(row, col + 1, snapshot.tasks)?;
                sheet.write_number(row, col + 2, snapshot.completed_tasks)?;
                sheet.write_number(row, col + 3, stage.lead_time())?;
                sheet.write_number(row, col + 4, stage.headcount())?;
                col += 4;
            }
            sheet.write_number(row, col + 1, data.remaining_tasks())?;
            sheet.write_string(row, col + 2, data.remaining_time.as_str())?;
            sheet.write_string(row, col + 3, data.total_time_taken.as_str())?;
            row += 1;
        }

        let label_col = (width - 3) as u16;
        for (label, value) in summary_rows(pipeline) {
            write_summary(sheet, row, label_col, label, &value)?;
            row += 1;
        }

        Ok(workbook)
    }
}

fn write_summary(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    label: &str,
    value: &str,
) -> ExportResult<()> {
    sheet.write_string(row, col, label)?;
    sheet.write_string(row, col + 1, value)?;
    Ok(())
}

impl HistoryExporter for XlsxHistoryExporter {
    fn export(&self, pipeline: &Pipeline, path: &Path) -> ExportResult<()> {
        let mut workbook = self.build_workbook(pipeline)?;
        workbook.save(path)?;
        tracing::info!(
            path = %path.display(),
            rows = pipeline.daily_data().len(),
            "历史工作簿导出完成"
        );
        Ok(())
    }
}
