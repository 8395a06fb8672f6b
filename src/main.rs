/*!
 * Region Allocator Simulator - Main Entry Point
 *
 * Drives a simulator session from a script file or standard input:
 *   regionsim [SCRIPT]
 */

use anyhow::Context;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tracing::info;

use region_allocator::{init_tracing, Session, SimulatorConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = SimulatorConfig::from_env();
    info!(
        total_size = config.total_size,
        compaction_threshold = config.compaction_threshold,
        auto_init = config.auto_init,
        "Region simulator starting"
    );

    let mut session: Session = Session::new(config);

    let reader: Box<dyn BufRead> = match std::env::args().nth(1) {
        Some(path) => {
            info!(script = %path, "Reading commands from script");
            let file = File::open(&path).with_context(|| format!("failed to open {}", path))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in reader.lines() {
        let line = line.context("failed to read command")?;
        if let Some(output) = session.run_line(&line) {
            writeln!(out, "{}", output)?;
        }
    }

    info!(
        log_entries = session.log().len(),
        "Region simulator finished"
    );
    Ok(())
}
