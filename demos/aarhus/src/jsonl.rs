//! JSON-lines tick source: one `TickInput` object per line.
//!
//! Stands in for the subscriber socket.  A line that does not decode is a
//! dropped tick: it is logged and skipped, and the next line is read.

use std::io::BufRead;

use tracing::warn;

use sl_sim::{SimResult, TickInput, TickSource};

pub struct JsonLinesSource<R: BufRead> {
    reader:  R,
    line_no: usize,
    dropped: usize,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line_no: 0, dropped: 0 }
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl<R: BufRead> TickSource for JsonLinesSource<R> {
    fn next_tick(&mut self) -> SimResult<Option<TickInput>> {
        let mut line = String::new();
        loop {
            line.clear();
            let n = self.reader.read_line(&mut line)?;
            if n == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            match serde_json::from_str::<TickInput>(text) {
                Ok(tick) => return Ok(Some(tick)),
                Err(e) => {
                    self.dropped += 1;
                    warn!(line = self.line_no, error = %e, "dropping undecodable tick");
                }
            }
        }
    }
}
