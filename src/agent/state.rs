//! Clipboard agent state machine
//!
//! Each hotkey trigger walks `Idle → Reading → Invoking → Writing → Idle`.
//! Stages return typed results; the loop logs failures and goes back to
//! Idle. Triggers are queued in the event channel and handled one at a time
//! in arrival order.

use super::clipboard::ClipboardAccess;
use super::hotkey::HotkeyEvent;
use super::input::PasteSink;
use crate::activity::ActivityLog;
use crate::core::{preview, ModelInvoker, TaskKind};
use crate::error::{FluentError, FluentResult};
use std::error::Error as _;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

/// What a hotkey asks the agent to do with the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteMode {
    /// English to Tamil romanized (Taglish)
    Transliterate,
    /// English spelling and grammar
    Correct,
}

impl RewriteMode {
    pub fn label(self) -> &'static str {
        match self {
            RewriteMode::Transliterate => "Taglish Conversion",
            RewriteMode::Correct => "English Correction",
        }
    }

    pub fn task(self) -> TaskKind {
        match self {
            RewriteMode::Transliterate => TaskKind::Transliterate,
            RewriteMode::Correct => TaskKind::Proofread,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Idle,
    Reading,
    Invoking,
    Writing,
}

/// Successful end of one trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Text was written to the clipboard and pasted
    Pasted(String),
    /// Nothing on the clipboard; no model call was made
    EmptyClipboard,
}

/// Why the agent loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    ExitHotkey,
    Interrupted,
    ListenerClosed,
}

/// Hotkey-driven clipboard rewriter
pub struct ClipboardAgent {
    invoker: Arc<ModelInvoker>,
    clipboard: Box<dyn ClipboardAccess>,
    paster: Box<dyn PasteSink>,
    log: ActivityLog,
    paste_delay: Duration,
    state: AgentState,
    history: Vec<AgentState>,
}

impl ClipboardAgent {
    pub fn new(
        invoker: Arc<ModelInvoker>,
        clipboard: Box<dyn ClipboardAccess>,
        paster: Box<dyn PasteSink>,
        log: ActivityLog,
        paste_delay: Duration,
    ) -> Self {
        Self {
            invoker,
            clipboard,
            paster,
            log,
            paste_delay,
            state: AgentState::Idle,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    /// States visited by the most recent trigger, ending in Idle
    pub fn last_transitions(&self) -> &[AgentState] {
        &self.history
    }

    fn transition(&mut self, next: AgentState) {
        debug!("Agent state: {:?} -> {:?}", self.state, next);
        self.state = next;
        self.history.push(next);
    }

    /// Handle one trigger. Always returns to Idle; the outcome is logged
    /// here and also returned.
    pub async fn handle(&mut self, mode: RewriteMode) -> FluentResult<TriggerOutcome> {
        self.history.clear();
        let result = self.process(mode).await;
        self.transition(AgentState::Idle);

        match &result {
            Ok(TriggerOutcome::Pasted(text)) => self.log.info(&format!(
                "{} complete. Result: {}",
                mode.label(),
                preview(text, 80)
            )),
            Ok(TriggerOutcome::EmptyClipboard) => self.log.error("Clipboard is empty, skipping."),
            Err(e) => self.log.error(&format!(
                "Error during {}: {}",
                mode.label(),
                error_chain(e)
            )),
        }
        result
    }

    async fn process(&mut self, mode: RewriteMode) -> FluentResult<TriggerOutcome> {
        self.transition(AgentState::Reading);
        let text = self.clipboard.get_text()?.trim().to_string();
        if text.is_empty() {
            return Ok(TriggerOutcome::EmptyClipboard);
        }

        self.log.info(&format!(
            "Processing {} for text: {}...",
            mode.label(),
            preview(&text, 50)
        ));

        self.transition(AgentState::Invoking);
        let rewritten = self.invoker.rewrite(mode.task(), &text).await?;
        let rewritten = rewritten.trim().to_string();

        self.transition(AgentState::Writing);
        if rewritten.is_empty() {
            return Err(FluentError::EmptyOutput);
        }

        self.clipboard.set_text(&rewritten)?;
        // Let the target application register the clipboard update
        tokio::time::sleep(self.paste_delay).await;
        self.paster.paste()?;

        Ok(TriggerOutcome::Pasted(rewritten))
    }

    /// Process hotkey events until the exit chord, Ctrl-C, or the listener
    /// going away.
    pub async fn run(&mut self, mut events: UnboundedReceiver<HotkeyEvent>) -> StopReason {
        self.log.info("Service started. Waiting for hotkeys...");

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        let reason = loop {
            let event = tokio::select! {
                event = events.recv() => event,
                _ = &mut shutdown => break StopReason::Interrupted,
            };

            match event {
                Some(HotkeyEvent::Rewrite(mode)) => {
                    let interrupted = tokio::select! {
                        _ = self.handle(mode) => false,
                        _ = &mut shutdown => true,
                    };
                    if interrupted {
                        break StopReason::Interrupted;
                    }
                }
                Some(HotkeyEvent::Exit) => break StopReason::ExitHotkey,
                None => break StopReason::ListenerClosed,
            }
        };

        self.state = AgentState::Idle;
        match reason {
            StopReason::Interrupted => self
                .log
                .info("Keyboard interrupt detected, exiting gracefully."),
            StopReason::ListenerClosed => self.log.error("Hotkey listener stopped."),
            StopReason::ExitHotkey => {}
        }
        self.log.info("Service stopped by user.");
        reason
    }
}

/// `outer: inner: root` rendering of an error and its sources
fn error_chain(err: &FluentError) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !rendered.ends_with(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}
