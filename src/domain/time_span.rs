// ==========================================
// 产线流转仿真 - 时长展示换算
// ==========================================
// 日历换算: 1 天 = 24 小时, 1 小时 = 60 分钟
// 换算结果一律截断取整
// ==========================================

use serde::Serialize;
use std::fmt;

pub const MINUTES_PER_HOUR: u64 = 60;
pub const HOURS_PER_DAY: u64 = 24;
pub const MINUTES_PER_CALENDAR_DAY: u64 = MINUTES_PER_HOUR * HOURS_PER_DAY;

// ==========================================
// CalendarSpan - 日历时长 ({d}d:{h}h:{m}m)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CalendarSpan {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl CalendarSpan {
    /// 由小数天数换算（小数部分按 24 小时展开）
    pub fn from_fractional_days(days: f64) -> Self {
        if days.is_nan() || days <= 0.0 {
            return Self::default();
        }

        let whole_days = days.trunc();
        let hours = (days - whole_days) * HOURS_PER_DAY as f64;
        let whole_hours = hours.trunc();
        let minutes = (hours - whole_hours) * MINUTES_PER_HOUR as f64;

        Self {
            days: whole_days as u64,
            hours: whole_hours as u64,
            minutes: minutes.trunc() as u64,
        }
    }

    /// 由总分钟数换算
    pub fn from_minutes(total_minutes: u64) -> Self {
        Self {
            days: total_minutes / MINUTES_PER_CALENDAR_DAY,
            hours: (total_minutes % MINUTES_PER_CALENDAR_DAY) / MINUTES_PER_HOUR,
            minutes: total_minutes % MINUTES_PER_HOUR,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0
    }
}

impl fmt::Display for CalendarSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d:{}h:{}m", self.days, self.hours, self.minutes)
    }
}

// ==========================================
// WorkHours - 纯工时 ({h}h:{m}m)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WorkHours {
    pub hours: u64,
    pub minutes: u64,
}

impl WorkHours {
    pub fn from_minutes(total_minutes: u64) -> Self {
        Self {
            hours: total_minutes / MINUTES_PER_HOUR,
            minutes: total_minutes % MINUTES_PER_HOUR,
        }
    }
}

impl fmt::Display for WorkHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h:{}m", self.hours, self.minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractional_days_truncate() {
        assert_eq!(CalendarSpan::from_fractional_days(1.5).to_string(), "1d:12h:0m");
        assert_eq!(CalendarSpan::from_fractional_days(0.0).to_string(), "0d:0h:0m");
        assert_eq!(CalendarSpan::from_fractional_days(-3.0).to_string(), "0d:0h:0m");
        assert_eq!(CalendarSpan::from_fractional_days(f64::NAN).to_string(), "0d:0h:0m");
    }

    #[test]
    fn test_minutes_to_calendar() {
        // 4 个工作日 × 390 = 1560 分钟 = 1d:2h:0m
        assert_eq!(CalendarSpan::from_minutes(1560).to_string(), "1d:2h:0m");
        assert_eq!(CalendarSpan::from_minutes(390).to_string(), "0d:6h:30m");
        assert!(CalendarSpan::from_minutes(0).is_zero());
    }

    #[test]
    fn test_work_hours() {
        assert_eq!(WorkHours::from_minutes(1560).to_string(), "26h:0m");
        assert_eq!(WorkHours::from_minutes(390).to_string(), "6h:30m");
    }
}
