//! Paste emission using Linux evdev/uinput
//!
//! A virtual keyboard that only knows the keys of the configured paste
//! chord. Works on both X11 and Wayland.

use crate::error::{FluentError, FluentResult};
use evdev::{uinput::VirtualDeviceBuilder, AttributeSet, Key};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Something that can make the focused application paste
pub trait PasteSink: Send {
    fn paste(&mut self) -> FluentResult<()>;
}

/// Modifier keys plus the main key of a chord
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub modifiers: Vec<Key>,
    pub key: Key,
}

impl KeyChord {
    /// Parse chords such as `ctrl+v` or `shift+insert`
    pub fn parse(chord: &str) -> FluentResult<Self> {
        let mut keys = chord
            .split('+')
            .map(|part| {
                parse_key(part.trim())
                    .ok_or_else(|| FluentError::Config(format!("unknown key '{}' in '{}'", part, chord)))
            })
            .collect::<FluentResult<Vec<Key>>>()?;

        let key = keys
            .pop()
            .ok_or_else(|| FluentError::Config(format!("empty key chord '{}'", chord)))?;
        Ok(Self {
            modifiers: keys,
            key,
        })
    }
}

/// Virtual keyboard for the paste keystroke
pub struct VirtualKeyboard {
    device: evdev::uinput::VirtualDevice,
    chord: KeyChord,
}

impl VirtualKeyboard {
    /// Create a uinput device able to send `chord`
    pub fn new(chord: KeyChord) -> FluentResult<Self> {
        let mut keys = AttributeSet::<Key>::new();
        for key in chord.modifiers.iter().chain(std::iter::once(&chord.key)) {
            keys.insert(*key);
        }

        let device = VirtualDeviceBuilder::new()
            .and_then(|builder| builder.name("Fluenter Virtual Keyboard").with_keys(&keys))
            .and_then(|builder| builder.build())
            .map_err(|e| FluentError::Input(format!("Failed to create virtual keyboard: {}", e)))?;

        info!("⌨️ Virtual keyboard created");
        Ok(Self { device, chord })
    }

    fn emit(&mut self, key: Key, value: i32) -> FluentResult<()> {
        debug!("Key {}: {:?}", if value == 1 { "down" } else { "up" }, key);
        self.device
            .emit(&[evdev::InputEvent::new(evdev::EventType::KEY, key.code(), value)])
            .map_err(|e| FluentError::Input(format!("Failed to emit {:?}: {}", key, e)))
    }

    /// Press the modifiers, tap the key, release in reverse order
    fn send_chord(&mut self) -> FluentResult<()> {
        let chord = self.chord.clone();

        for modifier in &chord.modifiers {
            self.emit(*modifier, 1)?;
            thread::sleep(Duration::from_millis(5));
        }

        self.emit(chord.key, 1)?;
        thread::sleep(Duration::from_millis(10));
        self.emit(chord.key, 0)?;

        for modifier in chord.modifiers.iter().rev() {
            self.emit(*modifier, 0)?;
            thread::sleep(Duration::from_millis(5));
        }

        Ok(())
    }
}

impl PasteSink for VirtualKeyboard {
    fn paste(&mut self) -> FluentResult<()> {
        self.send_chord()
    }
}

/// Parse a key name string to evdev Key
pub fn parse_key(name: &str) -> Option<Key> {
    match name.to_uppercase().as_str() {
        "V" => Some(Key::KEY_V),
        "INSERT" | "INS" => Some(Key::KEY_INSERT),
        "SHIFT" | "LSHIFT" => Some(Key::KEY_LEFTSHIFT),
        "RSHIFT" => Some(Key::KEY_RIGHTSHIFT),
        "CTRL" | "LCTRL" | "CONTROL" => Some(Key::KEY_LEFTCTRL),
        "RCTRL" => Some(Key::KEY_RIGHTCTRL),
        "SUPER" | "META" => Some(Key::KEY_LEFTMETA),
        _ => None,
    }
}
