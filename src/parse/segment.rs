use std::collections::VecDeque;
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use itertools::Itertools;
use regex::Regex;
use tracing::{debug, trace};

use super::encoding::Encoding;
use super::errors::{ImportError, ParseError};

/// The text of one hand and where it started in the decoded input.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub offset: usize,
    pub text: String,
}

/// Splits a blob of hand histories on a site specific boundary pattern.
#[derive(Debug, Clone)]
pub struct Segmenter {
    boundary: Regex,
}

impl Segmenter {
    pub fn new(boundary: &str) -> Result<Self, ParseError> {
        Ok(Segmenter {
            boundary: Regex::new(boundary)?,
        })
    }

    /// Every non blank segment, the trailing one included.
    pub fn split(&self, text: &str) -> Vec<Segment> {
        let (mut segments, consumed) = self.split_complete(text);
        if let Some(seg) = trimmed_segment(text, consumed, text.len()) {
            segments.push(seg);
        }
        segments
    }

    /// Only the segments closed by a boundary, plus how many bytes of
    /// `text` they used up. Whatever follows the last boundary may still be
    /// growing.
    pub fn split_complete(&self, text: &str) -> (Vec<Segment>, usize) {
        let mut segments = Vec::new();
        let mut start = 0;
        for m in self.boundary.find_iter(text) {
            if let Some(seg) = trimmed_segment(text, start, m.start()) {
                segments.push(seg);
            }
            start = m.end();
        }
        (segments, start)
    }
}

fn trimmed_segment(text: &str, start: usize, end: usize) -> Option<Segment> {
    let raw = &text[start..end];
    let trimmed = raw.trim_start();
    let lead = raw.len() - trimmed.len();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        None
    } else {
        Some(Segment {
            offset: start + lead,
            text: trimmed.to_string(),
        })
    }
}

/// Cancels a [`TailFollower`] from any thread.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Follows a growing source and yields hands as they are completed.
///
/// The boundary rule is applied again after every read, so a segment is
/// only handed out once the boundary after it has arrived. When the
/// source has nothing new the follower sleeps for `poll_interval` and
/// tries again, until its [`StopHandle`] is triggered. Text after the last
/// boundary is never yielded.
pub struct TailFollower<R: Read> {
    reader: R,
    segmenter: Segmenter,
    encodings: Vec<Encoding>,
    poll_interval: Duration,
    stop: StopHandle,
    raw: Vec<u8>,
    text: String,
    text_offset: usize,
    ready: VecDeque<Segment>,
}

impl<R: Read> TailFollower<R> {
    pub fn new(reader: R, segmenter: Segmenter, encodings: Vec<Encoding>) -> Self {
        TailFollower {
            reader,
            segmenter,
            encodings,
            poll_interval: Duration::from_millis(500),
            stop: StopHandle::new(),
            raw: Vec::new(),
            text: String::new(),
            text_offset: 0,
            ready: VecDeque::new(),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Read whatever is available. Returns the number of new bytes.
    fn fill(&mut self) -> Result<usize, ImportError> {
        let mut chunk = [0u8; 8192];
        let n = self.reader.read(&mut chunk)?;
        if n == 0 {
            return Ok(0);
        }
        self.raw.extend_from_slice(&chunk[..n]);

        let decoded = self
            .encodings
            .iter()
            .find_map(|enc| enc.decode_prefix(&self.raw));
        let Some((text, used)) = decoded else {
            return Err(ImportError::Parse {
                hand_id: None,
                source: ParseError::Undecodable(self.encodings.iter().join(", ")),
            });
        };
        self.raw.drain(..used);
        self.text.push_str(&text);

        let (segments, consumed) = self.segmenter.split_complete(&self.text);
        for mut seg in segments {
            seg.offset += self.text_offset;
            trace!(offset = seg.offset, "Tail segment complete");
            self.ready.push_back(seg);
        }
        self.text.drain(..consumed);
        self.text_offset += consumed;
        Ok(n)
    }
}

impl<R: Read> Iterator for TailFollower<R> {
    type Item = Result<Segment, ImportError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(seg) = self.ready.pop_front() {
                return Some(Ok(seg));
            }
            if self.stop.is_stopped() {
                debug!(pending = self.text.len(), "Tail follower stopped");
                return None;
            }
            match self.fill() {
                Ok(0) => thread::sleep(self.poll_interval),
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
