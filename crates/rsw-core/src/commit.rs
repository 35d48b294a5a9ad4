//! Runs the external commit/push script after a page is generated.
//!
//! The script is opaque: it is run through `bash` from the project root with
//! no arguments. Its outcome never fails generation; callers decide how to
//! report [`CommitOutcome::Missing`] and [`CommitOutcome::Failed`].

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::{Result, RswError};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum CommitOutcome {
    Committed,
    Missing,
    Failed(String),
}

/// Run `<root>/<script>` and wait at most `timeout` for it to exit.
pub fn run_commit_script(root: &Path, script: &str, timeout: Duration) -> CommitOutcome {
    let path = crate::paths::under_root(root, Path::new(script));
    if !path.exists() {
        tracing::debug!(path = %path.display(), "commit script not found");
        return CommitOutcome::Missing;
    }

    tracing::info!(script = %path.display(), "running commit script");
    match run_with_timeout(&path, root, timeout) {
        Ok(Some(status)) if status.success() => CommitOutcome::Committed,
        Ok(Some(status)) => CommitOutcome::Failed(format!("script exited with {status}")),
        Ok(None) => CommitOutcome::Failed(format!(
            "script did not finish within {}s",
            timeout.as_secs()
        )),
        Err(e) => CommitOutcome::Failed(e.to_string()),
    }
}

/// Returns `None` if the script was killed after `timeout`.
fn run_with_timeout(script: &Path, cwd: &Path, timeout: Duration) -> Result<Option<ExitStatus>> {
    let bash = which::which("bash").map_err(|_| RswError::ShellNotFound)?;
    let mut child = Command::new(bash)
        .arg(script)
        .current_dir(cwd)
        .stdin(Stdio::null())
        // stdout is reserved for the generator's own report (and --json)
        .stdout(Stdio::from(std::io::stderr()))
        .spawn()?;

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            // Already-exited races surface as an error here; ignore it.
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TIMEOUT: Duration = Duration::from_secs(10);

    fn write_script(dir: &TempDir, body: &str) {
        std::fs::write(dir.path().join("auto_commit_push.sh"), body).unwrap();
    }

    #[test]
    fn missing_script_is_reported() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            run_commit_script(dir.path(), "auto_commit_push.sh", TIMEOUT),
            CommitOutcome::Missing
        );
    }

    #[test]
    fn successful_script_runs_in_root() {
        let dir = TempDir::new().unwrap();
        write_script(&dir, "touch committed.marker\n");
        assert_eq!(
            run_commit_script(dir.path(), "auto_commit_push.sh", TIMEOUT),
            CommitOutcome::Committed
        );
        assert!(dir.path().join("committed.marker").exists());
    }

    #[test]
    fn failing_script_is_reported() {
        let dir = TempDir::new().unwrap();
        write_script(&dir, "exit 3\n");
        match run_commit_script(dir.path(), "auto_commit_push.sh", TIMEOUT) {
            CommitOutcome::Failed(msg) => assert!(msg.contains('3'), "{msg}"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn script_output_goes_to_stderr() {
        let dir = TempDir::new().unwrap();
        write_script(&dir, "echo '[main abc123] Add week'\n");
        assert_eq!(
            run_commit_script(dir.path(), "auto_commit_push.sh", TIMEOUT),
            CommitOutcome::Committed
        );
    }

    #[test]
    fn slow_script_is_killed() {
        let dir = TempDir::new().unwrap();
        write_script(&dir, "sleep 30\n");
        let started = Instant::now();
        let outcome =
            run_commit_script(dir.path(), "auto_commit_push.sh", Duration::from_millis(200));
        assert!(matches!(outcome, CommitOutcome::Failed(ref m) if m.contains("did not finish")));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
