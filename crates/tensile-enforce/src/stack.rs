//! Call-stack capture.
//!
//! Capture is an injected capability ([`StackCapturer`]) so it can be replaced
//! or disabled. The process holds one installed capturer; when none was
//! installed, [`capturer`] picks [`BacktraceCapturer`] or [`NoopCapturer`]
//! according to [`EnforceConfig::capture_stacks`](crate::EnforceConfig).

use std::backtrace::{Backtrace, BacktraceStatus};
use std::sync::OnceLock;

use crate::config::{self, ConfigError};

static CAPTURER: OnceLock<Box<dyn StackCapturer>> = OnceLock::new();

/// Produces symbolic frame descriptors for the current thread.
///
/// Implementations return at most `limit` frames, innermost first, and
/// return fewer (never padding) when the stack is shallower. Implementations
/// must be callable concurrently from any thread.
pub trait StackCapturer: Send + Sync {
    fn capture(&self, limit: usize) -> Vec<String>;
}

/// Walks the stack with `std::backtrace`, regardless of `RUST_BACKTRACE`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BacktraceCapturer;

impl StackCapturer for BacktraceCapturer {
    fn capture(&self, limit: usize) -> Vec<String> {
        let backtrace = Backtrace::force_capture();
        if backtrace.status() != BacktraceStatus::Captured {
            return Vec::new();
        }
        parse_frames(&backtrace.to_string(), limit)
    }
}

/// Captures nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCapturer;

impl StackCapturer for NoopCapturer {
    fn capture(&self, _limit: usize) -> Vec<String> {
        Vec::new()
    }
}

/// Returns the same frames every time. Useful for deterministic output.
#[derive(Debug, Default, Clone)]
pub struct FixedCapturer {
    frames: Vec<String>,
}

impl FixedCapturer {
    pub fn new<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FixedCapturer {
            frames: frames.into_iter().map(Into::into).collect(),
        }
    }
}

impl StackCapturer for FixedCapturer {
    fn capture(&self, limit: usize) -> Vec<String> {
        self.frames.iter().take(limit).cloned().collect()
    }
}

/// Splits a rendered backtrace into one descriptor per frame.
///
/// Frame headers look like `  3: crate::module::function`; the following
/// `at path:line:col` line, when present, is appended to the descriptor.
/// Extra symbols of inlined frames are folded into the enclosing frame.
///
/// The leading run of frames inside this crate (capture and error
/// construction) is dropped before `limit` applies, so the first frame is
/// the enforcement site.
fn parse_frames(rendered: &str, limit: usize) -> Vec<String> {
    let mut frames: Vec<String> = Vec::new();
    let mut located = false;
    let mut leading = true;
    let mut skipping = false;

    for line in rendered.lines() {
        let trimmed = line.trim_start();
        if let Some(symbol) = frame_header(trimmed) {
            if leading && is_internal(symbol) {
                skipping = true;
                continue;
            }
            leading = false;
            skipping = false;
            if frames.len() == limit {
                break;
            }
            frames.push(symbol.to_string());
            located = false;
        } else if let Some(path) = trimmed.strip_prefix("at ") {
            if skipping {
                continue;
            }
            if let Some(frame) = frames.last_mut() {
                if !located {
                    frame.push_str(" at ");
                    frame.push_str(path);
                    located = true;
                }
            }
        }
    }

    frames
}

fn is_internal(symbol: &str) -> bool {
    symbol.starts_with("tensile_enforce::")
        || symbol.starts_with("<tensile_enforce::")
        || symbol.contains(" as tensile_enforce::")
        || symbol.starts_with("std::backtrace")
}

fn frame_header(line: &str) -> Option<&str> {
    let (index, symbol) = line.split_once(": ")?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(symbol.trim())
}

/// The installed capturer, or the configured default.
pub fn capturer() -> &'static dyn StackCapturer {
    CAPTURER
        .get_or_init(|| {
            if config::global().capture_stacks {
                Box::new(BacktraceCapturer)
            } else {
                Box::new(NoopCapturer)
            }
        })
        .as_ref()
}

/// Installs the process-wide capturer. Only the first installation (and only
/// before any error was constructed) takes effect.
pub fn install(capturer: Box<dyn StackCapturer>) -> Result<(), ConfigError> {
    CAPTURER
        .set(capturer)
        .map_err(|_| ConfigError::CapturerAlreadyInstalled)?;
    tracing::info!("custom stack capturer installed");
    Ok(())
}
