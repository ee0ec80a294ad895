use std::sync::Arc;

use dslog::{Seq, Severity, log_here, logger_config};

fn main() {
    let path = std::env::temp_dir().join("dslog_multi_threaded.log");
    std::fs::remove_file(&path).ok();
    let logger = Arc::new(
        logger_config()
            .with_level(Severity::Info)
            .with_log_file(&path)
            .with_timer(true)
            .build(),
    );
    log_here!(logger, "Hello, world!");

    let handles: Vec<_> = (0..5)
        .map(|i| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                logger.log(
                    format!("Hello from thread {i}"),
                    Some(Severity::Warning),
                    Some(line!()),
                    Some(&format!("thread {i}")),
                );
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    logger.log_at(Seq(&[1, 2, 3]), Severity::Debug);
    logger.set_file_path("/nonexistent/dir/log.txt");
    logger.log_msg("file sink now fails, reported on the console");

    println!("\n--- {} ---", path.display());
    print!("{}", std::fs::read_to_string(&path).unwrap());
}
