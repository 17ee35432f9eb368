//! Feed decoding.
//!
//! The engine emits one [`RoundSnapshot`] per line. Consumers read the stream
//! line by line; blank lines are skipped.

use std::io::BufRead;

use crate::snapshot::RoundSnapshot;

/// Errors raised while decoding a snapshot feed
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to read feed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed snapshot on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Iterator over the snapshots of a line-oriented feed
pub struct FeedReader<R> {
    reader: R,
    line_number: usize,
    buffer: String,
}

impl<R: BufRead> FeedReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Number of lines consumed so far, blank ones included.
    pub fn lines_read(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for FeedReader<R> {
    type Item = Result<RoundSnapshot, FeedError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(FeedError::Io(e))),
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if line.is_empty() {
                continue;
            }
            return Some(RoundSnapshot::from_jsonl(line).map_err(|source| {
                FeedError::Malformed {
                    line: self.line_number,
                    source,
                }
            }));
        }
    }
}

/// Decodes a whole feed, stopping at the first malformed line.
pub fn read_feed<R: BufRead>(reader: R) -> Result<Vec<RoundSnapshot>, FeedError> {
    FeedReader::new(reader).collect()
}
