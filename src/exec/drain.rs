// src/exec/drain.rs

//! Bounded draining of a child's output stream.
//!
//! Each captured stream gets its own drain loop. With a bound, the loop
//! polls for data and gives up once nothing arrives past the deadline, so a
//! command that keeps its stderr open (e.g. a lingering background server)
//! still hands control back with whatever was read.

use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, warn};

use crate::types::StreamTimeout;

/// Minimum wait for each read once a bounded drain is past its deadline.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Everything read from one stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainedStream {
    /// Captured text, trimmed of leading/trailing whitespace.
    pub text: String,
    /// The bound elapsed before end-of-file; `text` may be incomplete.
    pub timed_out: bool,
}

/// Read `reader` line by line until end-of-file or until `timeout` elapses
/// with no data available.
///
/// `label` names the stream in log lines, e.g. `"npm stdout"`.
pub async fn drain_stream<R>(reader: R, timeout: StreamTimeout, label: &str) -> DrainedStream
where
    R: AsyncRead + Unpin,
{
    let start = Instant::now();
    let mut reader = BufReader::new(reader);
    let mut raw: Vec<u8> = Vec::new();
    let mut line: Vec<u8> = Vec::new();
    let mut timed_out = false;

    loop {
        let read = match timeout {
            StreamTimeout::Unbounded => reader.read_until(b'\n', &mut line).await,
            StreamTimeout::After(limit) => {
                let wait = limit.saturating_sub(start.elapsed()).max(POLL_INTERVAL);
                match tokio::time::timeout(wait, reader.read_until(b'\n', &mut line)).await {
                    Ok(read) => read,
                    Err(_) => {
                        timed_out = true;
                        warn!(
                            stream = %label,
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            "timed out waiting for stream; keeping partial output"
                        );
                        break;
                    }
                }
            }
        };

        match read {
            Ok(0) => break,
            Ok(_) => {
                raw.append(&mut line);
            }
            Err(e) => {
                warn!(stream = %label, error = %e, "error reading stream; keeping partial output");
                break;
            }
        }
    }

    // A cancelled read can leave a partial line behind.
    raw.append(&mut line);

    debug!(
        stream = %label,
        elapsed_ms = start.elapsed().as_millis() as u64,
        bytes = raw.len(),
        "stream drain completed"
    );

    DrainedStream {
        text: String::from_utf8_lossy(&raw).trim().to_string(),
        timed_out,
    }
}
