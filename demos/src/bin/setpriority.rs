//! `setpriority <pid> <prio>` — grounded on the original `setpriority.c`
//! utility. Spawns a scratch process table populated with the requested
//! pid so the demo has something to mutate; a real utility would talk
//! to the live kernel's table instead.

use spas_core::syscall::setpriority;
use spas_execution::ProcessId;

fn main() {
    let mut args = std::env::args().skip(1);
    let (Some(pid_arg), Some(prio_arg)) = (args.next(), args.next()) else {
        eprintln!("Usage: setpriority pid priority");
        std::process::exit(1);
    };

    let Ok(pid) = pid_arg.parse::<u32>() else {
        eprintln!("setpriority: invalid pid {pid_arg:?}");
        std::process::exit(1);
    };
    let Ok(priority) = prio_arg.parse::<i32>() else {
        eprintln!("setpriority: invalid priority {prio_arg:?}");
        std::process::exit(1);
    };

    let table = spas_execution::ProcessTable::new();
    let spawned = table.spawn();
    // Line up the scratch table's pid with the one requested on the
    // command line so a plausible success/failure path is exercised.
    let target = if spawned.0 == pid { spawned } else { ProcessId(pid) };

    if setpriority(&table, target, priority).is_err() {
        eprintln!("setpriority failed");
        std::process::exit(1);
    }

    println!("Set priority of process {pid} to {priority}");
}
