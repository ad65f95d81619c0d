// ==========================================
// 产线流转仿真 - 随机到达生成器
// ==========================================
// 职责: 按固定间隔向首工序投放随机批量任务
// 同步: 与推演驱动共用同一把 tokio Mutex，投料只落在两个工作日之间
// 停止: 产线完成 / 驱动发出停止信号
// ==========================================

use crate::config::simulation_config::ArrivalConfig;
use crate::engine::error::{SimulationError, SimulationResult};
use crate::engine::events::{SimulationEvent, SimulationEventPublisher};
use crate::engine::pipeline::Pipeline;
use crate::engine::runner::{RunSummary, SimulationRunner};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::time::MissedTickBehavior;

/// 推演驱动与到达生成器共享的产线
pub type SharedPipeline = Arc<Mutex<Pipeline>>;

// ==========================================
// SimpleRng - xorshift64（可复现批量序列）
// ==========================================
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

// ==========================================
// ArrivalGenerator
// ==========================================
#[derive(Debug, Clone)]
pub struct ArrivalGenerator {
    interval: Duration,
    max_tasks: u32,
    rng: SimpleRng,
}

impl ArrivalGenerator {
    pub fn new(interval: Duration, max_tasks: u32, seed: u64) -> Self {
        Self {
            interval,
            max_tasks: max_tasks.max(1),
            rng: SimpleRng::new(seed),
        }
    }

    /// 由配置创建（未指定种子时取当前时间）
    ///
    /// # 错误
    /// 配置校验失败时返回 `SimulationError::Config`
    pub fn from_config(config: &ArrivalConfig) -> SimulationResult<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| {
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
        });
        Ok(Self::new(
            Duration::from_millis(config.interval_ms),
            config.max_tasks,
            seed,
        ))
    }

    /// 下一批到达数量，位于 [1, max_tasks]
    pub fn next_batch(&mut self) -> u32 {
        1 + (self.rng.next_u64() % self.max_tasks as u64) as u32
    }

    /// 持续投料直到产线完成或收到停止信号
    ///
    /// # 返回
    /// 累计投放任务数
    pub async fn run(
        mut self,
        pipeline: SharedPipeline,
        mut stop: watch::Receiver<bool>,
        publisher: Arc<dyn SimulationEventPublisher>,
    ) -> u64 {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut total: u64 = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        break;
                    }
                    continue;
                }
            }

            let batch = self.next_batch();
            // 持锁发布: 事件顺序与投料、推进顺序一致
            let mut guard = pipeline.lock().await;
            if guard.is_complete() {
                break;
            }
            guard.inject_tasks(batch as f64);
            total += batch as u64;
            publisher.publish(SimulationEvent::TasksArrived { count: batch });
        }

        tracing::debug!(total, "到达生成器停止");
        total
    }
}

/// 带随机到达的推演
///
/// 每个工作日在持锁期间完成，工作日之间休眠 `step_delay` 让出投料窗口；
/// 某日推进后全线清零即结束并停止生成器。
///
/// # 返回
/// (推演汇总, 生成器累计投放数)
pub async fn run_with_arrivals(
    runner: &SimulationRunner,
    pipeline: SharedPipeline,
    generator: ArrivalGenerator,
    step_delay: Duration,
) -> SimulationResult<(RunSummary, u64)> {
    let (stop_tx, stop_rx) = watch::channel(false);
    let handle = tokio::spawn(generator.run(
        pipeline.clone(),
        stop_rx,
        runner.publisher().clone(),
    ));

    let start_day = pipeline.lock().await.days_passed();
    let result = loop {
        {
            let mut guard = pipeline.lock().await;
            if guard.is_complete() {
                break runner.finish(&guard);
            }
            if guard.days_passed() - start_day >= runner.max_days() {
                break Err(SimulationError::DayLimitExceeded {
                    max_days: runner.max_days(),
                    remaining_tasks: guard.remaining_tasks(),
                });
            }
            runner.step(&mut guard);
            if guard.is_complete() {
                break runner.finish(&guard);
            }
        }
        tokio::time::sleep(step_delay).await;
    };

    // 接收端已退出时发送失败，可忽略
    let _ = stop_tx.send(true);
    let injected = handle.await?;

    result.map(|summary| (summary, injected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stage::Stage;
    use crate::engine::events::NoOpEventPublisher;

    #[test]
    fn test_batches_within_range_and_reproducible() {
        let mut a = ArrivalGenerator::new(Duration::from_millis(1), 20, 42);
        let mut b = ArrivalGenerator::new(Duration::from_millis(1), 20, 42);

        for _ in 0..200 {
            let x = a.next_batch();
            assert!((1..=20).contains(&x));
            assert_eq!(x, b.next_batch());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[tokio::test]
    async fn test_generator_stops_on_signal() {
        let mut l0 = Stage::new("L0", 1, 60.0).unwrap();
        l0.add_tasks(1.0);
        let pipeline: SharedPipeline = Arc::new(Mutex::new(Pipeline::new(vec![l0]).unwrap()));
        let (stop_tx, stop_rx) = watch::channel(false);

        let generator = ArrivalGenerator::new(Duration::from_millis(2), 5, 7);
        let handle = tokio::spawn(generator.run(
            pipeline.clone(),
            stop_rx,
            Arc::new(NoOpEventPublisher),
        ));

        tokio::time::sleep(Duration::from_millis(20)).await;
        stop_tx.send(true).unwrap();
        let total = handle.await.unwrap();

        assert!(total >= 1);
        assert_eq!(pipeline.lock().await.injected_tasks(), 1.0 + total as f64);
    }
}
