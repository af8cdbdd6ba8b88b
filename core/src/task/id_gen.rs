use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use chrono::Utc;

/// Time-based task ids: the current Unix time in milliseconds as a decimal
/// string, bumped past the previous id whenever the clock has not advanced.
#[derive(Debug, Default)]
pub struct TaskIdGenerator {
    last: AtomicU64,
}

impl TaskIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.next_after(now).to_string()
    }

    fn next_after(&self, now: u64) -> u64 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Next id from the process-wide generator.
pub fn generate_task_id() -> String {
    static GENERATOR: OnceLock<TaskIdGenerator> = OnceLock::new();
    GENERATOR.get_or_init(TaskIdGenerator::new).next_id()
}
