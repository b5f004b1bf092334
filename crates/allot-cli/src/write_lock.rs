use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const LOCK_WAIT_TIMEOUT: Duration = Duration::from_secs(300);
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(250);

/// Held for the lifetime of a mutating command; removes the lock file on drop.
pub struct WriteLockGuard {
    path: PathBuf,
}

impl Drop for WriteLockGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Serialize mutating commands against one project store.
///
/// Waits while another live `allot` process holds the lock and clears locks
/// left behind by processes that no longer exist.
pub async fn acquire_for_project(project_root: &Path) -> anyhow::Result<WriteLockGuard> {
    let lock_path = project_root.join(".allot").join("allot.write.lock");
    let started = Instant::now();

    loop {
        let state = match try_acquire(&lock_path) {
            Ok(guard) => return Ok(guard),
            Err(LockState::Stale) => {
                tracing::warn!(path = %lock_path.display(), "removing stale write lock");
                let _ = std::fs::remove_file(&lock_path);
                continue;
            }
            Err(state) => state,
        };

        if started.elapsed() >= LOCK_WAIT_TIMEOUT {
            match state {
                LockState::HeldBy(pid) => anyhow::bail!(
                    "another allocation is running (pid {pid}); try again after it finishes"
                ),
                _ => anyhow::bail!(
                    "could not acquire write lock at {}; remove it if no allot process is running",
                    lock_path.display()
                ),
            }
        }
        tracing::debug!(?state, "waiting for write lock");
        tokio::time::sleep(LOCK_RETRY_DELAY).await;
    }
}

#[derive(Debug)]
enum LockState {
    HeldBy(u32),
    Stale,
    Unknown,
}

fn try_acquire(lock_path: &Path) -> Result<WriteLockGuard, LockState> {
    if let Some(parent) = lock_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(lock_path)
    {
        Ok(mut file) => {
            let _ = writeln!(file, "{}", std::process::id());
            Ok(WriteLockGuard {
                path: lock_path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            let mut contents = String::new();
            if OpenOptions::new()
                .read(true)
                .open(lock_path)
                .and_then(|mut file| file.read_to_string(&mut contents))
                .is_err()
            {
                return Err(LockState::Unknown);
            }

            match contents.trim().parse::<u32>() {
                Ok(pid) if is_process_running(pid) => Err(LockState::HeldBy(pid)),
                Ok(_) => Err(LockState::Stale),
                Err(_) => Err(LockState::Unknown),
            }
        }
        Err(_) => Err(LockState::Unknown),
    }
}

fn is_process_running(pid: u32) -> bool {
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .status()
        .is_ok_and(|status| status.success())
}
