use std::fs::File;
use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Context;
use daemonize::Daemonize;
use tracing::debug;

/// Where log output lands when backgrounding without an explicit logfile.
pub const SYSTEM_LOG_PATH: &str = "/var/log/wdogd.log";

/// Fork into the background, detach from the controlling terminal and point
/// stderr at the right log sink.
///
/// Must run before the tokio runtime is created: forking with a live
/// runtime leaves its worker state behind in the child.
///
/// With a logfile, all tracing output (which goes to stderr) is appended
/// there. Without one it is appended to [`SYSTEM_LOG_PATH`], or discarded
/// when that cannot be opened.
pub fn daemonize(logfile: Option<&Path>) -> Result<(), anyhow::Error> {
    let stderr = match logfile {
        Some(path) => Some(
            open_log(path)
                .with_context(|| format!("Failed opening logfile {}", path.display()))?,
        ),
        None => open_log(Path::new(SYSTEM_LOG_PATH)).ok(),
    };

    let mut daemon = Daemonize::new();
    if let Some(stderr) = stderr {
        daemon = daemon.stderr(stderr);
    }

    daemon.start().context("Failed moving to the background")?;
    debug!("Starting in daemon mode");
    Ok(())
}

fn open_log(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
