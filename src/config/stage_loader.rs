// ==========================================
// 产线流转仿真 - 工序表读取
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 流程: 文件 → 原始行 (表头 → 值) → StageConfig
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::simulation_config::{config_keys, StageConfig};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始行: 表头（小写、去空白）→ 单元格文本
pub type RawRow = HashMap<String, String>;

// ==========================================
// Trait: StageTableReader
// ==========================================
pub trait StageTableReader {
    /// 读取为原始行
    fn read_raw_rows(&self, path: &Path) -> ConfigResult<Vec<RawRow>>;

    /// 读取并映射为工序配置
    fn read_stages(&self, path: &Path) -> ConfigResult<Vec<StageConfig>> {
        let rows = self.read_raw_rows(path)?;
        rows.iter()
            .enumerate()
            // 数据行号从 2 开始（第 1 行为表头）
            .map(|(idx, row)| map_row(idx + 2, row))
            .collect()
    }
}

fn check_file(path: &Path, allowed: &[&str]) -> ConfigResult<()> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !allowed.contains(&ext.as_str()) {
        return Err(ConfigError::UnsupportedFormat(ext));
    }
    Ok(())
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

fn lookup<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .find_map(|alias| row.get(*alias))
        .map(|v| v.as_str())
        .filter(|v| !v.is_empty())
}

fn parse_field<T: std::str::FromStr>(row_no: usize, field: &str, raw: &str) -> ConfigResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::TypeConversionError {
            row: row_no,
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// 人数允许 Excel 数值单元格的 "5.0" 形式，但必须为整数
fn parse_headcount(row_no: usize, raw: &str) -> ConfigResult<u32> {
    let value: f64 = parse_field(row_no, "headcount", raw)?;
    if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
        return Err(ConfigError::TypeConversionError {
            row: row_no,
            field: "headcount".to_string(),
            value: raw.to_string(),
        });
    }
    Ok(value as u32)
}

/// 原始行 → StageConfig（qa_rate 空白时取 1.0）
fn map_row(row_no: usize, row: &RawRow) -> ConfigResult<StageConfig> {
    let name = lookup(row, config_keys::COL_NAME)
        .ok_or_else(|| ConfigError::MissingColumn("name".to_string()))?;
    let headcount = lookup(row, config_keys::COL_HEADCOUNT)
        .ok_or_else(|| ConfigError::MissingColumn("headcount".to_string()))?;
    let lead_time = lookup(row, config_keys::COL_LEAD_TIME)
        .ok_or_else(|| ConfigError::MissingColumn("lead_time".to_string()))?;

    let qa_rate = match lookup(row, config_keys::COL_QA_RATE) {
        Some(raw) => parse_field(row_no, "qa_rate", raw)?,
        None => 1.0,
    };

    Ok(StageConfig {
        name: name.to_string(),
        headcount: parse_headcount(row_no, headcount)?,
        lead_time: parse_field(row_no, "lead_time", lead_time)?,
        qa_rate,
    })
}

// ==========================================
// CSV Reader 实现
// ==========================================
pub struct CsvStageReader;

impl StageTableReader for CsvStageReader {
    fn read_raw_rows(&self, path: &Path) -> ConfigResult<Vec<RawRow>> {
        check_file(path, &["csv"])?;

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: RawRow = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), v.trim().to_string()))
                .collect();

            // 跳过完全空白的行
            if row.values().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// Excel Reader 实现（读取第一个工作表）
// ==========================================
pub struct ExcelStageReader;

impl StageTableReader for ExcelStageReader {
    fn read_raw_rows(&self, path: &Path) -> ConfigResult<Vec<RawRow>> {
        check_file(path, &["xlsx", "xls"])?;

        let mut workbook = open_workbook_auto(path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ConfigError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut cells = range.rows();
        let headers: Vec<String> = cells
            .next()
            .ok_or_else(|| ConfigError::ExcelParseError("Excel 文件无数据行".to_string()))?
            .iter()
            .map(|cell| normalize_header(&cell.to_string()))
            .collect();

        let mut rows = Vec::new();
        for data_row in cells {
            let row: RawRow = headers
                .iter()
                .zip(data_row.iter())
                .map(|(h, cell)| (h.clone(), cell.to_string().trim().to_string()))
                .collect();

            if row.values().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// 通用读取器（根据扩展名自动选择）
// ==========================================
pub struct UniversalStageReader;

impl UniversalStageReader {
    pub fn read<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Vec<StageConfig>> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let stages = match ext.as_str() {
            "csv" => CsvStageReader.read_stages(path)?,
            "xlsx" | "xls" => ExcelStageReader.read_stages(path)?,
            _ => return Err(ConfigError::UnsupportedFormat(ext)),
        };

        tracing::debug!(path = %path.display(), stages = stages.len(), "读取工序表");
        Ok(stages)
    }
}
