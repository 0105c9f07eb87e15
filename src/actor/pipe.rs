//! Pipe Actor: Dedicated thread reading commands from a named pipe.
//!
//! Opening a FIFO for reading blocks until a writer shows up, and a read
//! returns EOF once the last writer closes it. Neither has a timeout, so
//! the pipe lives on its own thread and the engine only ever sees whole
//! commands. Every EOF triggers a reopen; there is no retry limit.

use super::messages::{Command, PipeEvent};
use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, info, warn};
use std::ffi::CString;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Pipe path used when none is given.
pub const DEFAULT_PIPE_PATH: &str = "/tmp/fbprogress_pipe";

/// Commands that may queue up before the engine catches up.
const CHANNEL_CAPACITY: usize = 64;

/// Something that hands out a fresh line reader on every (re)connect.
pub trait CommandSource {
    /// Reader for one connection.
    type Reader: BufRead;

    /// Open a new connection. May block until data can flow.
    fn connect(&mut self) -> io::Result<Self::Reader>;
}

/// A FIFO in the filesystem.
#[derive(Debug, Clone)]
pub struct FifoSource {
    path: PathBuf,
}

impl FifoSource {
    /// Create the FIFO (mode 0666 before umask), reusing an existing one.
    #[allow(unsafe_code)]
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        // SAFETY: `c_path` is a valid NUL-terminated string.
        if unsafe { libc::mkfifo(c_path.as_ptr(), 0o666) } < 0 {
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::AlreadyExists {
                return Err(err);
            }
            if !std::fs::metadata(&path)?.file_type().is_fifo() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} exists and is not a FIFO", path.display()),
                ));
            }
            debug!("reusing existing FIFO {}", path.display());
        }
        Ok(Self { path })
    }

    /// Get the FIFO path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the FIFO from the filesystem.
    pub fn remove(&self) -> io::Result<()> {
        std::fs::remove_file(&self.path)
    }

    /// A guard that removes the FIFO when dropped, on every exit path.
    #[must_use]
    pub fn remove_on_drop(&self) -> FifoGuard {
        FifoGuard {
            fifo: self.clone(),
        }
    }
}

/// Removes its FIFO when dropped.
#[derive(Debug)]
pub struct FifoGuard {
    fifo: FifoSource,
}

impl Drop for FifoGuard {
    fn drop(&mut self) {
        match self.fifo.remove() {
            Ok(()) => debug!("removed FIFO {}", self.fifo.path().display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("cannot remove pipe {}: {e}", self.fifo.path().display()),
        }
    }
}

impl CommandSource for FifoSource {
    type Reader = BufReader<File>;

    fn connect(&mut self) -> io::Result<Self::Reader> {
        File::open(&self.path).map(BufReader::new)
    }
}

/// Connection state of a [`PipeReader`].
enum Link<R> {
    /// Waiting for the next `connect`.
    Disconnected,
    /// Reading from a live connection.
    Connected(R),
}

/// Turns a [`CommandSource`] into a stream of commands, reconnecting on EOF.
pub struct PipeReader<S: CommandSource> {
    /// Where connections come from.
    source: S,
    /// Current connection.
    link: Link<S::Reader>,
    /// Number of successful connects.
    connects: u64,
    /// Scratch buffer for one line.
    line: Vec<u8>,
}

impl<S: CommandSource> PipeReader<S> {
    /// Create a disconnected reader.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            link: Link::Disconnected,
            connects: 0,
            line: Vec::new(),
        }
    }

    /// Number of connections opened so far.
    pub const fn connects(&self) -> u64 {
        self.connects
    }

    /// Next non-empty line, without its line terminator.
    ///
    /// Invalid UTF-8 is replaced, not rejected. Errors only come from the
    /// source itself.
    pub fn next_line(&mut self) -> io::Result<String> {
        loop {
            let reader = match &mut self.link {
                Link::Connected(reader) => reader,
                Link::Disconnected => {
                    let reader = self.source.connect()?;
                    self.connects += 1;
                    debug!("pipe connected (#{})", self.connects);
                    self.link = Link::Connected(reader);
                    continue;
                }
            };

            self.line.clear();
            if reader.read_until(b'\n', &mut self.line)? == 0 {
                debug!("pipe writer closed, reopening");
                self.link = Link::Disconnected;
                continue;
            }

            let text = String::from_utf8_lossy(&self.line);
            let text = text.trim_end_matches('\n');
            let text = text.strip_suffix('\r').unwrap_or(text);
            if !text.is_empty() {
                return Ok(text.to_string());
            }
        }
    }

    /// Next well-formed command. Malformed lines are skipped.
    pub fn next_command(&mut self) -> io::Result<Command> {
        loop {
            let line = self.next_line()?;
            debug!("received: {line}");
            if let Some(command) = Command::parse(&line) {
                return Ok(command);
            }
        }
    }
}

/// Pipe actor that forwards commands to the engine.
pub struct PipeActor {
    /// Handle to the pipe thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Receiver for pipe events.
    events: Receiver<PipeEvent>,
}

impl PipeActor {
    /// Spawn the pipe thread.
    ///
    /// The thread stops after forwarding [`Command::Quit`], after a source
    /// error, or once the receiver is gone.
    pub fn spawn<S>(source: S) -> io::Result<Self>
    where
        S: CommandSource + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let (tx, events) = bounded(CHANNEL_CAPACITY);

        let handle = thread::Builder::new()
            .name("fbprogress-pipe".to_string())
            .spawn(move || {
                Self::run_loop(PipeReader::new(source), &tx, &shutdown_clone);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            events,
        })
    }

    /// Get the event receiver.
    pub const fn receiver(&self) -> &Receiver<PipeEvent> {
        &self.events
    }

    /// Signal the pipe thread to stop after its current read.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Check if the pipe thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the pipe thread to finish.
    ///
    /// Blocks for as long as the thread is waiting on the source.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop<S: CommandSource>(mut reader: PipeReader<S>, sender: &Sender<PipeEvent>, shutdown: &AtomicBool) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.send(PipeEvent::Shutdown);
                break;
            }

            match reader.next_command() {
                Ok(command) => {
                    let quit = command == Command::Quit;
                    if sender.send(PipeEvent::Command(command)).is_err() {
                        break;
                    }
                    if quit {
                        info!("quit received");
                        break;
                    }
                }
                Err(e) => {
                    warn!("pipe read failed: {e}");
                    let _ = sender.send(PipeEvent::Error(e.to_string()));
                    break;
                }
            }
        }
    }
}

impl Drop for PipeActor {
    fn drop(&mut self) {
        // Never join here: the thread may be parked in a blocking open.
        self.shutdown();
    }
}
