//! Global hotkey detection
//!
//! - Ctrl+T: convert clipboard text to Taglish
//! - Ctrl+G: correct clipboard English
//! - Ctrl+Shift+Backspace: exit

use super::state::RewriteMode;
use rdev::{listen, Event, EventType, Key};
use std::thread;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

/// Hotkey events sent to the agent loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyEvent {
    Rewrite(RewriteMode),
    Exit,
}

/// Modifier state and chord matching, independent of the OS hook
#[derive(Debug, Default)]
pub struct KeyTracker {
    ctrl: bool,
    shift: bool,
    /// Chord key currently held; auto-repeat presses of it are ignored
    held: Option<Key>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw key event; returns the hotkey it completes, if any
    pub fn handle(&mut self, event: &EventType) -> Option<HotkeyEvent> {
        match event {
            EventType::KeyPress(key) => self.press(*key),
            EventType::KeyRelease(key) => {
                self.release(*key);
                None
            }
            _ => None,
        }
    }

    fn press(&mut self, key: Key) -> Option<HotkeyEvent> {
        match key {
            Key::ControlLeft | Key::ControlRight => {
                self.ctrl = true;
                None
            }
            Key::ShiftLeft | Key::ShiftRight => {
                self.shift = true;
                None
            }
            _ if self.held == Some(key) => None,
            Key::KeyT if self.ctrl && !self.shift => {
                self.held = Some(key);
                Some(HotkeyEvent::Rewrite(RewriteMode::Transliterate))
            }
            Key::KeyG if self.ctrl && !self.shift => {
                self.held = Some(key);
                Some(HotkeyEvent::Rewrite(RewriteMode::Correct))
            }
            Key::Backspace if self.ctrl && self.shift => {
                self.held = Some(key);
                Some(HotkeyEvent::Exit)
            }
            _ => None,
        }
    }

    fn release(&mut self, key: Key) {
        match key {
            Key::ControlLeft | Key::ControlRight => self.ctrl = false,
            Key::ShiftLeft | Key::ShiftRight => self.shift = false,
            _ => {}
        }
        if self.held == Some(key) {
            self.held = None;
        }
    }
}

/// Start the global hotkey listener on its own thread.
///
/// The receiver closes if the OS hook fails.
pub fn start_hotkey_listener() -> UnboundedReceiver<HotkeyEvent> {
    let (tx, rx) = unbounded_channel();
    thread::spawn(move || run_listener(tx));
    rx
}

fn run_listener(tx: UnboundedSender<HotkeyEvent>) {
    let mut tracker = KeyTracker::new();
    info!("⌨️ Hotkey listener started");

    let callback = move |event: Event| forward(&mut tracker, &tx, &event.event_type);

    // Blocks until the hook fails
    if let Err(e) = listen(callback) {
        error!("Hotkey listener error: {:?}", e);
    }
}

/// Match one raw event and push the resulting hotkey onto the tokio
/// channel. Runs on the OS hook thread; `send` never blocks.
fn forward(tracker: &mut KeyTracker, tx: &UnboundedSender<HotkeyEvent>, event: &EventType) {
    if let Some(hotkey) = tracker.handle(event) {
        debug!("Hotkey: {:?}", hotkey);
        let _ = tx.send(hotkey);
    }
}
