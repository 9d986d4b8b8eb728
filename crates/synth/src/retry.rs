//! Save-with-retry for output decks that may be locked by a presentation
//! program holding the target file open.

use log::{error, warn};
use praise_core::Result;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Retry schedule for writing the output deck.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempts at the requested path before falling back.
    pub attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Run `write` against `target`, retrying on contention. When every
    /// attempt at `target` is rebuffed, write once to a timestamp-suffixed
    /// sibling instead. Returns the path that was actually written, or
    /// `None` when nothing was.
    ///
    /// Errors that are not contention (bad template, full disk) fail
    /// immediately; retrying would not help.
    pub fn save_with_fallback<F>(&self, target: &Path, mut write: F) -> Option<PathBuf>
    where
        F: FnMut(&Path) -> Result<()>,
    {
        for attempt in 1..=self.attempts {
            match write(target) {
                Ok(()) => return Some(target.to_path_buf()),
                Err(e) if e.is_contention() => {
                    warn!(
                        "{} is in use (attempt {}/{}): {}",
                        target.display(),
                        attempt,
                        self.attempts,
                        e
                    );
                    if attempt < self.attempts {
                        std::thread::sleep(self.delay);
                    }
                }
                Err(e) => {
                    error!("failed to write {}: {}", target.display(), e);
                    return None;
                }
            }
        }

        let alternate = timestamp_sibling(target);
        warn!(
            "{} stayed locked, writing {} instead",
            target.display(),
            alternate.display()
        );
        match write(&alternate) {
            Ok(()) => Some(alternate),
            Err(e) => {
                error!("failed to write {}: {}", alternate.display(), e);
                None
            }
        }
    }
}

/// `deck.pptx` becomes `deck_1724990000.pptx` next to the original.
fn timestamp_sibling(target: &Path) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("output"));
    let name = match target.extension() {
        Some(ext) => format!("{}_{}.{}", stem, stamp, ext.to_string_lossy()),
        None => format!("{}_{}", stem, stamp),
    };
    target.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use praise_core::Error;
    use std::io;

    fn contention() -> Error {
        Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
    }

    fn quick_policy() -> RetryPolicy {
        RetryPolicy {
            attempts: 3,
            delay: Duration::from_millis(0),
        }
    }

    #[test]
    fn first_attempt_success_returns_target() {
        let mut calls = 0;
        let written = quick_policy().save_with_fallback(Path::new("/tmp/out.pptx"), |_| {
            calls += 1;
            Ok(())
        });
        assert_eq!(written.as_deref(), Some(Path::new("/tmp/out.pptx")));
        assert_eq!(calls, 1);
    }

    #[test]
    fn contention_retries_then_succeeds() {
        let mut calls = 0;
        let written = quick_policy().save_with_fallback(Path::new("/tmp/out.pptx"), |_| {
            calls += 1;
            if calls < 3 {
                Err(contention())
            } else {
                Ok(())
            }
        });
        assert_eq!(written.as_deref(), Some(Path::new("/tmp/out.pptx")));
        assert_eq!(calls, 3);
    }

    #[test]
    fn exhausted_contention_falls_back_to_timestamped_name() {
        let mut paths = Vec::new();
        let written = quick_policy().save_with_fallback(Path::new("/tmp/out.pptx"), |p| {
            paths.push(p.to_path_buf());
            if paths.len() <= 3 {
                Err(contention())
            } else {
                Ok(())
            }
        });
        let written = written.unwrap();
        assert_ne!(written, Path::new("/tmp/out.pptx"));
        let name = written.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("out_"));
        assert!(name.ends_with(".pptx"));
        assert_eq!(paths.len(), 4);
    }

    #[test]
    fn non_contention_error_fails_immediately() {
        let mut calls = 0;
        let written = quick_policy().save_with_fallback(Path::new("/tmp/out.pptx"), |_| {
            calls += 1;
            Err(Error::Compose(String::from("bad template")))
        });
        assert!(written.is_none());
        assert_eq!(calls, 1);
    }

    #[test]
    fn fallback_failure_returns_none() {
        let written = quick_policy()
            .save_with_fallback(Path::new("/tmp/out.pptx"), |_| Err(contention()));
        assert!(written.is_none());
    }

    #[test]
    fn sibling_keeps_extension_and_directory() {
        let sib = timestamp_sibling(Path::new("/decks/sunday.pptx"));
        assert_eq!(sib.parent(), Some(Path::new("/decks")));
        assert_eq!(sib.extension().unwrap(), "pptx");
    }
}
