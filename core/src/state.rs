//! Observable state shared between view-models and whatever renders them.
//!
//! # Design
//! `Observable<T>` wraps a `tokio::sync::watch` channel: a renderer
//! subscribes, the view-model publishes whole-value updates. `close()` marks
//! the owning screen as torn down; anything an in-flight action tries to
//! publish afterwards is dropped.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
    closed: AtomicBool,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self {
            tx,
            closed: AtomicBool::new(false),
        }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the value. Ignored once closed.
    pub(crate) fn set(&self, value: T) {
        if self.is_closed() {
            return;
        }
        self.tx.send_replace(value);
    }

    /// Mutate in place and notify. Ignored once closed.
    pub(crate) fn update(&self, change: impl FnOnce(&mut T)) {
        if self.is_closed() {
            return;
        }
        self.tx.send_modify(change);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Four-state flow for one-shot submissions (login, register, adoption
/// form). `Success` and `Error` stay put until an explicit reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Phase<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Phase::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Phase::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// State of a list screen. Messages stay until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub is_loading: bool,
    pub items: Vec<T>,
    pub error: Option<String>,
    pub success_message: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            is_loading: false,
            items: Vec::new(),
            error: None,
            success_message: None,
        }
    }
}

impl<T> ListState<T> {
    pub(crate) fn start(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub(crate) fn loaded(&mut self, items: Vec<T>) {
        self.is_loading = false;
        self.items = items;
    }

    pub(crate) fn failed(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }
}
