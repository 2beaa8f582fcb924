use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use sysinfo::System;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Seconds since the service started
    pub uptime: f64,
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
    pub memory: MemoryUsage,
}

impl HealthStatus {
    pub fn healthy(uptime: Duration, memory: MemoryUsage) -> Self {
        Self {
            status: "healthy".to_string(),
            uptime: uptime.as_secs_f64(),
            timestamp: Utc::now(),
            memory,
        }
    }
}

/// Memory counters in bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    pub rss: u64,
    pub virtual_memory: u64,
    pub system_total: u64,
    pub system_used: u64,
}

impl MemoryUsage {
    /// Samples the current process. Counters that cannot be read are zero.
    pub fn sample() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();

        let mut usage = Self {
            system_total: sys.total_memory(),
            system_used: sys.used_memory(),
            ..Self::default()
        };

        match sysinfo::get_current_pid() {
            Ok(pid) => {
                sys.refresh_process(pid);
                if let Some(process) = sys.process(pid) {
                    usage.rss = process.memory();
                    usage.virtual_memory = process.virtual_memory();
                }
            }
            Err(e) => debug!("Unable to resolve current pid: {}", e),
        }

        usage
    }
}
