// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 构造测试产线、工序表临时文件
// ==========================================

#![allow(dead_code)]

use line_flow_sim::{Pipeline, Stage};
use rust_xlsxwriter::Workbook;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// 创建测试工序
pub fn stage(name: &str, headcount: u32, lead_time: f64, qa_rate: f64) -> Stage {
    Stage::with_qa_rate(name, headcount, lead_time, qa_rate).expect("invalid test stage")
}

/// 创建三工序产线（首工序预置投料）
///
/// L0: 40 人 / 30 分钟 / QA 0.8
/// L1: 10 人 / 45 分钟
/// L2: 5 人 / 60 分钟
pub fn three_stage_pipeline(seed: f64) -> Pipeline {
    let mut l0 = stage("L0", 40, 30.0, 0.8);
    l0.add_tasks(seed);
    Pipeline::new(vec![l0, stage("L1", 10, 45.0, 1.0), stage("L2", 5, 60.0, 1.0)])
        .expect("invalid test pipeline")
}

/// 写入带指定后缀的临时文件
pub fn temp_file_with(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    write!(file, "{}", content).expect("Failed to write temp file");
    file
}

/// 工作簿单元格
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

/// 写入单工作表的临时 .xlsx 文件
pub fn temp_workbook_with(rows: &[Vec<Cell>]) -> NamedTempFile {
    let file = Builder::new()
        .suffix(".xlsx")
        .tempfile()
        .expect("Failed to create temp file");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let written = match cell {
                Cell::Text(text) => sheet.write_string(r as u32, c as u16, *text),
                Cell::Number(value) => sheet.write_number(r as u32, c as u16, *value),
                Cell::Blank => continue,
            };
            written.expect("Failed to write cell");
        }
    }
    workbook.save(file.path()).expect("Failed to save workbook");
    file
}

/// 驱动至完成（带上限，防止测试挂起）
pub fn drive_to_completion(pipeline: &mut Pipeline, max_days: u32) {
    let mut days = 0;
    while !pipeline.is_complete() {
        assert!(days < max_days, "pipeline did not complete within {} days", max_days);
        pipeline.work_one_day();
        days += 1;
    }
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
