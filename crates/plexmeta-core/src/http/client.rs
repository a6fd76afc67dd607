//! libcurl-backed [`HttpSession`].

use super::{FetchStatus, HttpSession};
use crate::{Error, Result};
use std::cell::Cell;
use std::io::{self, Write};
use std::str;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Request settings shared by every GET: extra headers (the Plex token),
/// the per-request timeout and the receive buffer size.
///
/// A fresh `Easy` handle is built per request; one request is in flight at
/// a time.
#[derive(Debug, Clone)]
pub struct CurlSession {
    headers: Vec<(String, String)>,
    timeout: Duration,
    buffer_size: usize,
}

impl Default for CurlSession {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl CurlSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }
}

impl HttpSession for CurlSession {
    fn get(&self, url: &str, sink: &mut dyn Write) -> Result<FetchStatus> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(CONNECT_TIMEOUT)?;
        easy.timeout(self.timeout)?;
        easy.buffer_size(self.buffer_size)?;

        let mut list = curl::easy::List::new();
        for (k, v) in &self.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !self.headers.is_empty() {
            easy.http_headers(list)?;
        }

        // Status of the latest response seen; redirects report theirs first.
        let status = Cell::new(0u32);
        let mut written = 0u64;
        let mut write_err: Option<io::Error> = None;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|line| {
                if let Some(code) = parse_status_line(line) {
                    status.set(code);
                }
                true
            })?;
            transfer.write_function(|data| {
                if !(200..300).contains(&status.get()) {
                    // Error bodies are drained, never written.
                    return Ok(data.len());
                }
                match sink.write_all(data) {
                    Ok(()) => {
                        written += data.len() as u64;
                        Ok(data.len())
                    }
                    Err(e) => {
                        write_err = Some(e);
                        Ok(0) // abort transfer
                    }
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = write_err {
            return Err(Error::Io(e));
        }
        performed?;

        let code = easy.response_code()?;
        tracing::debug!(url, status = code, bytes = written, "GET finished");
        match code {
            200..=299 => Ok(FetchStatus::Complete { bytes: written }),
            404 => Ok(FetchStatus::NotFound),
            _ => Err(Error::Http {
                url: url.to_string(),
                status: code,
            }),
        }
    }
}

/// Status code from an `HTTP/x.y NNN reason` header line.
fn parse_status_line(line: &[u8]) -> Option<u32> {
    let line = str::from_utf8(line).ok()?;
    if !line.starts_with("HTTP/") {
        return None;
    }
    line.split_whitespace().nth(1)?.parse().ok()
}
