//! Clipboard Agent
//!
//! Global hotkeys rewrite whatever is on the clipboard and paste the result
//! into the focused application.

pub mod clipboard;
pub mod hotkey;
pub mod input;
pub mod state;

pub use clipboard::{ClipboardAccess, SystemClipboard};
pub use hotkey::{start_hotkey_listener, HotkeyEvent, KeyTracker};
pub use input::{KeyChord, PasteSink, VirtualKeyboard};
pub use state::{AgentState, ClipboardAgent, RewriteMode, StopReason, TriggerOutcome};
