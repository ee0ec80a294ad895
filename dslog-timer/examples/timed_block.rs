use std::time::Duration;

use dslog::{Severity, logger_config};
use dslog_timer::{LatencyTimer, time_block};

fn slow_step(logger: &dslog::Logger, ms: u64) {
    let _timer = LatencyTimer::new(logger, format!("slow_step({ms})"));
    std::thread::sleep(Duration::from_millis(ms));
}

fn main() {
    let logger = logger_config()
        .with_level(Severity::Debug)
        .with_timer(true)
        .build();
    let _total = LatencyTimer::with_start_line(&logger, "main");
    for ms in [10, 50, 120] {
        slow_step(&logger, ms);
    }
    let sum = time_block(&logger, "sum", || (0..1_000_000u64).sum::<u64>());
    logger.log_msg(format!("sum = {sum}"));
}
