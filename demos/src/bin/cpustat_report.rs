//! A reporter that invokes `cpustat` at a fixed cadence and prints
//! human-readable fields. Grounded directly on the original `cpustat.c`
//! reporter: ten reports, one simulated second (100 ticks) apart.

use spas_core::syscall::cpustat;
use spas_core::SpasConfig;
use spas_demos::{DecodedSnapshot, HostUserMemory, SimKernel, CPUSTAT_BUFFER_ADDR};

const REPORTS: usize = 10;
const TICKS_PER_SECOND: u32 = 100;

fn main() {
    env_logger::init();

    let kernel = SimKernel::new(SpasConfig::default());
    let user_memory = HostUserMemory::new();

    // A couple of CPU-bound processes so there is load to report on.
    let a = kernel.table.spawn();
    let b = kernel.table.spawn();
    kernel.scheduler.enqueue(a);
    kernel.scheduler.enqueue(b);

    for count in 0..REPORTS {
        kernel.advance(TICKS_PER_SECOND);

        if cpustat(&kernel.spas, &user_memory, CPUSTAT_BUFFER_ADDR).is_err() {
            eprintln!("cpustat failed");
            std::process::exit(1);
        }
        let snap = DecodedSnapshot::from_bytes(user_memory.read());

        println!("--- SPAS Scheduler Status ({}/{REPORTS}) ---", count + 1);
        println!("CPU Load:     {}%", snap.load);
        println!("Pred. Load:   {}%", snap.predicted_load);
        println!("Frequency:    {}", snap.frequency_label());
        let (whole, tenth) = snap.temp_display();
        println!("Virtual Temp: {whole}.{tenth} C");
        println!(
            "Thresholds:   L->M {}%, M->H {}%",
            snap.thresh_low_med, snap.thresh_med_high
        );
        println!();
    }
}
