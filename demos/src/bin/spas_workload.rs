//! Workload generator: spawns N CPU-bound processes and reports
//! `cpustat` snapshots while they run, to exercise load → frequency →
//! temperature → throttle transitions. Grounded on the original
//! `spas_test.c`.

use std::collections::HashMap;

use spas_core::syscall::cpustat;
use spas_core::SpasConfig;
use spas_demos::{DecodedSnapshot, HostUserMemory, SimKernel, CPUSTAT_BUFFER_ADDR};
use spas_execution::ProcessId;
use spas_hal::Yielder;

const DEFAULT_CHILDREN: usize = 4;
const REPORTS: usize = 20;
const TICKS_PER_SECOND: u32 = 100;
/// Simulated ticks of CPU-bound work per child — the demo analogue of
/// the original's `volatile` busy-loop counter.
const WORK_PER_CHILD: u64 = 4_000;

fn main() {
    env_logger::init();

    let n: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or(DEFAULT_CHILDREN);

    println!("spas_workload: starting {n} busy children");

    let kernel = SimKernel::new(SpasConfig::default());
    let user_memory = HostUserMemory::new();

    let mut remaining_work: HashMap<ProcessId, u64> = HashMap::new();
    let mut pids = Vec::with_capacity(n);
    for _ in 0..n {
        let pid = kernel.table.spawn();
        kernel.scheduler.enqueue(pid);
        remaining_work.insert(pid, WORK_PER_CHILD);
        pids.push(pid);
    }

    for rep in 0..REPORTS {
        if remaining_work.is_empty() {
            println!("spas_workload: all children exited, done.");
            break;
        }

        for _ in 0..TICKS_PER_SECOND {
            kernel.tick();
            if let Some(running) = kernel.table.current() {
                if let Some(work) = remaining_work.get_mut(&running) {
                    *work = work.saturating_sub(1);
                    if *work == 0 {
                        remaining_work.remove(&running);
                        kernel.table.exit(running);
                        kernel.scheduler.yield_current();
                    }
                }
            }
        }

        if cpustat(&kernel.spas, &user_memory, CPUSTAT_BUFFER_ADDR).is_err() {
            eprintln!("spas_workload: cpustat failed");
            break;
        }
        let snap = DecodedSnapshot::from_bytes(user_memory.read());

        println!("--- SPAS Workload Report {}/{REPORTS} ---", rep + 1);
        println!("CPU Load:       {}%", snap.load);
        println!("Predicted Load: {}%", snap.predicted_load);
        println!("Frequency:      {}", snap.frequency_label());
        let (whole, tenth) = snap.temp_display();
        println!("Virtual Temp:   {whole}.{tenth} C");
        println!(
            "Thresholds:     L->M {}%, M->H {}%",
            snap.thresh_low_med, snap.thresh_med_high
        );
        print!("Children PIDs: ");
        for pid in &pids {
            print!("{} ", pid.0);
        }
        println!();

        if rep == 0 {
            println!(
                "Note: watch Frequency and Virtual Temp — with busy children Frequency should increase and temp should rise."
            );
        }
    }

    if !remaining_work.is_empty() {
        println!("spas_workload: report budget exhausted with children still running.");
    }
}
