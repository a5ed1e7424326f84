//! Test doubles for the model, the clipboard and the paste keystroke.

#![allow(dead_code)]

use async_trait::async_trait;
use fluenter::activity::ActivityLog;
use fluenter::agent::{ClipboardAccess, ClipboardAgent, PasteSink};
use fluenter::core::ModelInvoker;
use fluenter::error::{FluentError, FluentResult};
use fluenter::llm::{GenerationOptions, TextModel};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// What the fake model does when called
#[derive(Clone)]
pub enum Behavior {
    Reply(String),
    Fail(String),
    Panic,
}

/// Model that counts calls and follows a fixed behavior
pub struct CountingModel {
    behavior: Behavior,
    calls: Arc<AtomicUsize>,
}

impl CountingModel {
    pub fn new(behavior: Behavior) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                behavior,
                calls: calls.clone(),
            },
            calls,
        )
    }

    /// Invoker around a model replying with `reply`, plus its call counter
    pub fn invoker(behavior: Behavior) -> (Arc<ModelInvoker>, Arc<AtomicUsize>) {
        let (model, calls) = Self::new(behavior);
        (Arc::new(ModelInvoker::new(Box::new(model), 1024)), calls)
    }
}

#[async_trait]
impl TextModel for CountingModel {
    fn name(&self) -> String {
        "counting".to_string()
    }

    async fn generate(&self, _prompt: &str, _options: GenerationOptions) -> FluentResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Reply(text) => Ok(text.clone()),
            Behavior::Fail(msg) => Err(FluentError::Provider(msg.clone())),
            Behavior::Panic => panic!("model exploded"),
        }
    }
}

/// In-memory clipboard; clones share contents
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    pub contents: Arc<Mutex<String>>,
    pub writes: Arc<AtomicUsize>,
}

impl MemoryClipboard {
    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::default();
        *clipboard.contents.lock().unwrap() = text.to_string();
        clipboard
    }

    pub fn text(&self) -> String {
        self.contents.lock().unwrap().clone()
    }
}

impl ClipboardAccess for MemoryClipboard {
    fn get_text(&mut self) -> FluentResult<String> {
        Ok(self.text())
    }

    fn set_text(&mut self, text: &str) -> FluentResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.contents.lock().unwrap() = text.to_string();
        Ok(())
    }
}

/// Paste sink that counts keystrokes, optionally failing
#[derive(Clone, Default)]
pub struct RecordingPaster {
    pub pastes: Arc<AtomicUsize>,
    pub fail: bool,
}

impl PasteSink for RecordingPaster {
    fn paste(&mut self) -> FluentResult<()> {
        if self.fail {
            return Err(FluentError::Input("uinput unavailable".to_string()));
        }
        self.pastes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Agent wired to in-memory doubles and a log file in a temp dir
pub struct AgentHarness {
    pub agent: ClipboardAgent,
    pub clipboard: MemoryClipboard,
    pub paster: RecordingPaster,
    pub log_dir: TempDir,
}

impl AgentHarness {
    pub fn new(invoker: Arc<ModelInvoker>, clipboard_text: &str) -> Self {
        Self::with_paster(invoker, clipboard_text, RecordingPaster::default())
    }

    pub fn with_paster(
        invoker: Arc<ModelInvoker>,
        clipboard_text: &str,
        paster: RecordingPaster,
    ) -> Self {
        let log_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let clipboard = MemoryClipboard::with_text(clipboard_text);
        let agent = ClipboardAgent::new(
            invoker,
            Box::new(clipboard.clone()),
            Box::new(paster.clone()),
            ActivityLog::new(log_dir.path().join("fluenter_log.log")),
            Duration::ZERO,
        );
        Self {
            agent,
            clipboard,
            paster,
            log_dir,
        }
    }

    pub fn log_contents(&self) -> String {
        std::fs::read_to_string(self.log_dir.path().join("fluenter_log.log")).unwrap_or_default()
    }

    pub fn pastes(&self) -> usize {
        self.paster.pastes.load(Ordering::SeqCst)
    }
}
