use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime};

use espwizard_core::{generate_yaml, DeviceDescription};
use log::{debug, warn};
use tokio::runtime::Runtime;
use tokio::signal;

use crate::debounce::Debouncer;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

pub fn run(
    description_path: &str,
    output: &str,
    to_stdout: bool,
    watch: bool,
) -> Result<(), Box<dyn Error>> {
    generate_once(description_path, output, to_stdout)?;

    if watch {
        watch_loop(description_path, output, to_stdout)?;
    }
    Ok(())
}

fn generate_once(description_path: &str, output: &str, to_stdout: bool) -> Result<(), Box<dyn Error>> {
    let description = fs::read_to_string(description_path)?;
    let config: DeviceDescription = serde_yaml::from_str(&description)?;
    let yaml = generate_yaml(&config)?;
    super::write_output(&yaml, output, to_stdout)
}

/// Re-generate whenever the description file changes, coalescing bursts of
/// editor writes through the debouncer.
fn watch_loop(description_path: &str, output: &str, to_stdout: bool) -> Result<(), Box<dyn Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut debouncer = Debouncer::new(DEBOUNCE_DELAY);
        let mut last_modified = modified_time(description_path);
        let mut poll = tokio::time::interval(POLL_INTERVAL);

        println!("Watching {} for changes. Press Ctrl+C to stop.", description_path);

        loop {
            tokio::select! {
                _ = signal::ctrl_c() => break,
                _ = poll.tick() => {
                    let modified = modified_time(description_path);
                    if modified != last_modified {
                        last_modified = modified;
                        debug!("{} changed", description_path);
                        debouncer.trigger(Instant::now());
                    }
                    if debouncer.ready(Instant::now()) {
                        if let Err(e) = generate_once(description_path, output, to_stdout) {
                            warn!("Regeneration failed: {}", e);
                            eprintln!("Regeneration failed: {}", e);
                        }
                    }
                }
            }
        }
    });
    Ok(())
}

fn modified_time(path: &str) -> Option<SystemTime> {
    Path::new(path).metadata().and_then(|m| m.modified()).ok()
}
