use crate::builder::build_key_set;
use crate::container::{HashSetKeys, SetLike};
use crate::error::SetBenchError;
use crate::random::SeededRandom;
use serde::Serialize;
use sysinfo::System;
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::debug;

/// Memory snapshot of the running process, in bytes.
///
/// The heap figures come from jemalloc and only track the process heap when
/// jemalloc is the global allocator, as it is in the `setbench` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    pub rss: u64,
    pub heap_allocated: u64,
    pub heap_resident: u64,
    pub virtual_memory: u64,
    pub system_used: u64,
    pub system_total: u64,
}

impl MemoryUsage {
    pub fn snapshot() -> Result<Self, SetBenchError> {
        let pid = sysinfo::get_current_pid().map_err(|e| SetBenchError::Memory(e.to_string()))?;
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_process(pid);

        let process = sys
            .process(pid)
            .ok_or_else(|| SetBenchError::Memory(format!("process {} not found", pid)))?;
        let (system_used, system_total) = normalize_sysinfo_mem(sys.total_memory(), sys.used_memory());
        let (heap_allocated, heap_resident) = heap_stats()?;

        Ok(Self {
            rss: process.memory(),
            heap_allocated,
            heap_resident,
            virtual_memory: process.virtual_memory(),
            system_used,
            system_total,
        })
    }

    pub fn to_json(&self) -> Result<String, SetBenchError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Bytes allocated by the application and bytes jemalloc keeps resident.
/// Returns `(allocated, resident)`.
fn heap_stats() -> Result<(u64, u64), SetBenchError> {
    // stats are cached until the epoch advances
    epoch::advance().map_err(|e| SetBenchError::Memory(e.to_string()))?;
    let allocated = stats::allocated::read().map_err(|e| SetBenchError::Memory(e.to_string()))?;
    let resident = stats::resident::read().map_err(|e| SetBenchError::Memory(e.to_string()))?;
    Ok((allocated as u64, resident as u64))
}

/// Some sysinfo builds report system memory in KiB. Compare against
/// /proc/meminfo and scale to bytes when that is the case.
/// Returns `(used_bytes, total_bytes)`.
fn normalize_sysinfo_mem(total_raw: u64, used_raw: u64) -> (u64, u64) {
    #[cfg(target_os = "linux")]
    {
        if let Some(mem_total_kib) = std::fs::read_to_string("/proc/meminfo")
            .ok()
            .and_then(|meminfo| meminfo_total_kib(&meminfo))
        {
            return scale_to_bytes(total_raw, used_raw, mem_total_kib);
        }
    }
    (used_raw, total_raw)
}

fn meminfo_total_kib(meminfo: &str) -> Option<u64> {
    meminfo
        .lines()
        .find(|l| l.starts_with("MemTotal:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|v| v.parse::<u64>().ok())
}

fn scale_to_bytes(total_raw: u64, used_raw: u64, mem_total_kib: u64) -> (u64, u64) {
    fn within_10_pct(a: f64, b: f64) -> bool {
        (a - b).abs() / a.max(b) <= 0.1
    }
    if within_10_pct(total_raw as f64, mem_total_kib as f64) {
        return (used_raw.saturating_mul(1024), total_raw.saturating_mul(1024));
    }
    (used_raw, total_raw)
}

/// Fills a hash set with `count` random keys of `key_length` drawn from one
/// seeded stream. Duplicate draws collapse.
pub fn fill_unique_keys(count: usize, key_length: usize, seed: u32) -> HashSetKeys<String> {
    let mut rnd = SeededRandom::new(seed);
    build_key_set(count, key_length, &mut rnd)
}

#[derive(Debug, Clone)]
pub struct MemoryOutcome {
    pub requested: usize,
    pub unique: usize,
    pub usage: MemoryUsage,
}

/// Builds the key set, then snapshots memory while the set is still alive.
pub fn run_memory_workload(count: usize, key_length: usize, seed: u32) -> Result<MemoryOutcome, SetBenchError> {
    println!("Generating {} keys of length {} each...", count, key_length);
    let set = fill_unique_keys(count, key_length, seed);
    debug!(unique = set.len(), "key set filled");
    let usage = MemoryUsage::snapshot()?;
    println!("Memory usage (bytes): {}", usage.to_json()?);
    Ok(MemoryOutcome {
        requested: count,
        unique: set.len(),
        usage,
    })
}
