use std::io::{self, BufRead, Read};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, warn};

use crate::input::interrupted;

pub(crate) enum ConsoleEvent {
    Line(String),
    Eof,
    Interrupt,
    Failed(io::Error),
}

/// Stdin as a `BufRead` where Ctrl-C surfaces as an interrupted read
/// instead of ending the process.
///
/// Lines come from a reader thread that only reads when asked, so nothing
/// competes with other consumers of the terminal between prompts. A line
/// request cut short by Ctrl-C stays outstanding and its line is delivered
/// to the next prompt.
pub struct ConsoleInput {
    requests: Sender<()>,
    events: Receiver<ConsoleEvent>,
    pending: bool,
    buffer: Vec<u8>,
    pos: usize,
    eof: bool,
}

impl ConsoleInput {
    pub fn spawn() -> io::Result<ConsoleInput> {
        let (event_sender, events) = mpsc::channel();
        let (requests, request_receiver) = mpsc::channel();

        spawn_interrupt_listener(event_sender.clone())?;
        spawn_stdin_reader(request_receiver, event_sender)?;

        Ok(ConsoleInput::from_channels(requests, events))
    }

    pub(crate) fn from_channels(requests: Sender<()>, events: Receiver<ConsoleEvent>) -> ConsoleInput {
        ConsoleInput {
            requests,
            events,
            pending: false,
            buffer: Vec::new(),
            pos: 0,
            eof: false,
        }
    }

    fn finish(&mut self) {
        self.pending = false;
        self.eof = true;
        self.buffer.clear();
        self.pos = 0;
    }
}

impl Read for ConsoleInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = {
            let available = self.fill_buf()?;
            let n = available.len().min(buf.len());
            buf[..n].copy_from_slice(&available[..n]);
            n
        };
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for ConsoleInput {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos < self.buffer.len() || self.eof {
            return Ok(&self.buffer[self.pos..]);
        }

        if !self.pending {
            if self.requests.send(()).is_err() {
                self.finish();
                return Ok(&self.buffer[..]);
            }
            self.pending = true;
        }

        match self.events.recv() {
            Ok(ConsoleEvent::Line(line)) => {
                self.pending = false;
                self.buffer = line.into_bytes();
                self.pos = 0;
            }
            Ok(ConsoleEvent::Interrupt) => return Err(interrupted()),
            Ok(ConsoleEvent::Failed(err)) => {
                self.pending = false;
                return Err(err);
            }
            Ok(ConsoleEvent::Eof) | Err(_) => self.finish(),
        }
        Ok(&self.buffer[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.buffer.len());
    }
}

fn spawn_interrupt_listener(events: Sender<ConsoleEvent>) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("ctrl-c".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                loop {
                    if let Err(err) = tokio::signal::ctrl_c().await {
                        warn!(%err, "unable to listen for ctrl-c");
                        break;
                    }
                    debug!("ctrl-c received");
                    if events.send(ConsoleEvent::Interrupt).is_err() {
                        break;
                    }
                }
            })
        })?;
    Ok(())
}

fn spawn_stdin_reader(requests: Receiver<()>, events: Sender<ConsoleEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for () in requests.iter() {
                let mut line = String::new();
                let event = match stdin.lock().read_line(&mut line) {
                    Ok(0) => ConsoleEvent::Eof,
                    Ok(_) => ConsoleEvent::Line(line),
                    Err(err) => ConsoleEvent::Failed(err),
                };
                let more = matches!(event, ConsoleEvent::Line(_));
                if events.send(event).is_err() || !more {
                    break;
                }
            }
        })?;
    Ok(())
}
