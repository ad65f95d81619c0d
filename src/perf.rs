use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use std::time::Instant;

static PERF_ENABLED: AtomicBool = AtomicBool::new(false);
static PERF_INIT: Once = Once::new();

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 性能日志开关
///
/// - Debug 默认开启；Release 默认关闭
/// - `LINE_FLOW_SIM_PERF=1` 强制开启，`=0` 强制关闭
pub fn perf_enabled() -> bool {
    PERF_INIT.call_once(|| {
        let enabled = match std::env::var("LINE_FLOW_SIM_PERF") {
            Ok(v) => is_true(&v),
            Err(_) => cfg!(debug_assertions),
        };
        PERF_ENABLED.store(enabled, Ordering::Relaxed);
    });
    PERF_ENABLED.load(Ordering::Relaxed)
}

/// 性能统计 Guard：记录 elapsed_ms + 推进天数
///
/// 使用方式：
/// ```ignore
/// let mut perf = line_flow_sim::perf::PerfGuard::new("run_to_completion");
/// // do work...
/// perf.set_days(pipeline.days_passed());
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    days: u32,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
            days: 0,
        }
    }

    /// 记录本次操作推进的工作日数
    pub fn set_days(&mut self, days: u32) {
        self.days = days;
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        if !perf_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_millis() as u64;

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            days = self.days,
            "done"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_true() {
        assert!(is_true(" Yes "));
        assert!(is_true("1"));
        assert!(!is_true("off"));
    }

    #[test]
    fn test_guard_drop_is_silent_without_subscriber() {
        let mut guard = PerfGuard::new("unit");
        guard.set_days(3);
        drop(guard);
    }
}
