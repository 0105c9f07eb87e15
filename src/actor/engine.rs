//! Engine: Main loop that applies pipe commands to the render session.
//!
//! The engine is the only owner of the [`RenderSession`]; the pipe thread
//! never touches video memory.

use super::messages::{Command, PipeEvent};
use crate::device::Device;
use crate::session::RenderSession;
use crossbeam_channel::Receiver;
use log::{debug, info, warn};
use std::ops::ControlFlow;

/// Why [`Engine::run`] returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A `QUIT` line arrived.
    Quit,
    /// The pipe failed; carries the error message.
    PipeFailed(String),
    /// The pipe thread stopped on request.
    Shutdown,
    /// Every sender is gone.
    Disconnected,
}

/// The main fbprogress engine.
pub struct Engine<D: Device> {
    /// The overlay being driven.
    session: RenderSession<D>,
    /// Events from the pipe thread.
    events: Receiver<PipeEvent>,
    /// Commands applied so far.
    applied: u64,
}

impl<D: Device> Engine<D> {
    /// Create an engine over an already shown session.
    pub const fn new(session: RenderSession<D>, events: Receiver<PipeEvent>) -> Self {
        Self {
            session,
            events,
            applied: 0,
        }
    }

    /// Apply one command: status text first, then progress.
    pub fn apply(&mut self, command: &Command) -> ControlFlow<StopReason> {
        match command {
            Command::Progress { percent, text } => {
                self.session.set_step_text(text);
                self.session.set_step_progress(*percent);
                self.applied += 1;
                ControlFlow::Continue(())
            }
            Command::Quit => ControlFlow::Break(StopReason::Quit),
        }
    }

    /// Handle one event from the pipe thread.
    pub fn handle(&mut self, event: PipeEvent) -> ControlFlow<StopReason> {
        match event {
            PipeEvent::Command(command) => self.apply(&command),
            PipeEvent::Error(message) => {
                warn!("stopping: {message}");
                ControlFlow::Break(StopReason::PipeFailed(message))
            }
            PipeEvent::Shutdown => ControlFlow::Break(StopReason::Shutdown),
        }
    }

    /// Block on pipe events until one of them stops the engine.
    pub fn run(&mut self) -> StopReason {
        loop {
            let Ok(event) = self.events.recv() else {
                debug!("pipe channel closed");
                return StopReason::Disconnected;
            };
            if let ControlFlow::Break(reason) = self.handle(event) {
                info!("engine stopped after {} commands: {reason:?}", self.applied);
                return reason;
            }
        }
    }

    /// Number of progress commands applied.
    pub const fn applied(&self) -> u64 {
        self.applied
    }

    /// Get the session.
    pub const fn session(&self) -> &RenderSession<D> {
        &self.session
    }

    /// Get a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut RenderSession<D> {
        &mut self.session
    }

    /// Take the session back, e.g. to close it.
    pub fn into_session(self) -> RenderSession<D> {
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::device::MemoryDevice;
    use crate::surface::Bgra;
    use crate::widget::Widget;
    use crossbeam_channel::unbounded;

    fn engine() -> (Engine<MemoryDevice>, crossbeam_channel::Sender<PipeEvent>) {
        let mut session = RenderSession::new(Config::default());
        session.open(MemoryDevice::new(1280, 720), 2).unwrap();
        session.show();
        session.set_step_text("Start....");
        let (tx, rx) = unbounded();
        (Engine::new(session, rx), tx)
    }

    fn progress(percent: i32, text: &str) -> PipeEvent {
        PipeEvent::Command(Command::Progress {
            percent,
            text: text.to_string(),
        })
    }

    #[test]
    fn test_apply_sets_text_then_progress() {
        let (mut engine, _tx) = engine();
        let flow = engine.apply(&Command::Progress {
            percent: 42,
            text: "Installing enigma2-plugin-extensions-foo".to_string(),
        });
        assert_eq!(flow, ControlFlow::Continue(()));

        let session = engine.session();
        assert_eq!(session.status().text(), "Installing foo");
        assert_eq!(session.bar().percent(), 42);
        let fill = session.bar().fill_rect(42).unwrap();
        assert!(session.surface().unwrap().is_filled(fill, Bgra::LIGHT_GRAY));
    }

    #[test]
    fn test_run_until_quit() {
        let (mut engine, tx) = engine();
        tx.send(progress(10, "one")).unwrap();
        tx.send(progress(60, "two")).unwrap();
        tx.send(PipeEvent::Command(Command::Quit)).unwrap();
        tx.send(progress(90, "never")).unwrap();

        assert_eq!(engine.run(), StopReason::Quit);
        assert_eq!(engine.applied(), 2);
        assert_eq!(engine.session().bar().percent(), 60);
        assert_eq!(engine.session().status().text(), "two");
    }

    #[test]
    fn test_run_stops_on_pipe_error() {
        let (mut engine, tx) = engine();
        tx.send(PipeEvent::Error("broken".to_string())).unwrap();
        assert_eq!(engine.run(), StopReason::PipeFailed("broken".to_string()));
    }

    #[test]
    fn test_run_stops_when_senders_gone() {
        let (mut engine, tx) = engine();
        tx.send(progress(5, "last")).unwrap();
        drop(tx);
        assert_eq!(engine.run(), StopReason::Disconnected);
        assert_eq!(engine.applied(), 1);
    }

    #[test]
    fn test_teardown_after_quit() {
        let (mut engine, tx) = engine();
        tx.send(progress(100, "done")).unwrap();
        tx.send(PipeEvent::Command(Command::Quit)).unwrap();
        engine.run();

        let mut session = engine.into_session();
        let window = session.window();
        let status = session.status().bounds();
        let device = session.close().unwrap();
        let snapshot = device.snapshot().unwrap();
        assert!(snapshot.is_filled(window, Bgra::TRANSPARENT));
        assert!(snapshot.is_filled(status, Bgra::TRANSPARENT));
    }

    #[test]
    fn test_commands_ignored_without_device() {
        let (tx, rx) = unbounded();
        let mut engine = Engine::new(RenderSession::<MemoryDevice>::new(Config::default()), rx);
        tx.send(progress(50, "headless")).unwrap();
        tx.send(PipeEvent::Command(Command::Quit)).unwrap();
        assert_eq!(engine.run(), StopReason::Quit);
        assert_eq!(engine.session().bar().percent(), 0);
    }
}
