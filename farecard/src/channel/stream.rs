// farecard/src/channel/stream.rs

use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::{debug, warn};

use crate::channel::traits::LineChannel;
use crate::{Error, Result};

/// LineChannel over any byte stream pair, e.g. an opened serial device or
/// stdin/stdout.
///
/// A reader thread turns the blocking `BufRead` into a queue so `poll_line`
/// never blocks. Once the input reaches EOF or fails, `poll_line` keeps
/// returning `None`.
pub struct StreamChannel<W: Write> {
    lines: Receiver<std::io::Result<String>>,
    writer: W,
    closed: bool,
}

impl<W: Write> StreamChannel<W> {
    pub fn spawn<R>(reader: R, writer: W) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        });
        Self {
            lines: rx,
            writer,
            closed: false,
        }
    }
}

impl<W: Write> LineChannel for StreamChannel<W> {
    fn send_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line).map_err(|e| Error::Channel(e.to_string()))?;
        self.writer
            .flush()
            .map_err(|e| Error::Channel(e.to_string()))
    }

    fn poll_line(&mut self) -> Result<Option<String>> {
        if self.closed {
            return Ok(None);
        }
        match self.lines.try_recv() {
            Ok(Ok(line)) => Ok(Some(line.trim_end_matches('\r').to_string())),
            Ok(Err(e)) => {
                self.closed = true;
                warn!("input stream failed: {}", e);
                Err(Error::Channel(e.to_string()))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                self.closed = true;
                debug!("input stream closed");
                Ok(None)
            }
        }
    }
}
