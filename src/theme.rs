//! Light/dark theme tracking for the editor, independent of form state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Theme subscription needs a Tokio runtime: {0}")]
    NoRuntime(#[from] TryCurrentError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Read the host's theme attribute (a class list such as `"app dark"`).
    pub fn from_attribute(attr: &str) -> Self {
        if attr.split_whitespace().any(|class| class == "dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Publishes the host's current theme.
pub struct ThemeSource {
    tx: watch::Sender<Theme>,
}

impl ThemeSource {
    pub fn new(initial: Theme) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn current(&self) -> Theme {
        *self.tx.borrow()
    }

    pub fn set(&self, theme: Theme) {
        let previous = self.tx.send_replace(theme);
        if previous != theme {
            debug!(?theme, "Theme changed");
        }
    }

    pub fn set_attribute(&self, attr: &str) {
        self.set(Theme::from_attribute(attr));
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Start tracking the theme on the current Tokio runtime. The
    /// subscription stops when dropped.
    pub fn subscribe(&self) -> Result<ThemeSubscription, ThemeError> {
        let handle = Handle::try_current()?;
        let mut rx = self.tx.subscribe();
        let is_dark = Arc::new(AtomicBool::new(*rx.borrow_and_update() == Theme::Dark));
        let flag = Arc::clone(&is_dark);
        let task = handle.spawn(async move {
            while rx.changed().await.is_ok() {
                let dark = *rx.borrow_and_update() == Theme::Dark;
                flag.store(dark, Ordering::Relaxed);
            }
        });
        Ok(ThemeSubscription { is_dark, task })
    }
}

pub struct ThemeSubscription {
    is_dark: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl ThemeSubscription {
    pub fn is_dark(&self) -> bool {
        self.is_dark.load(Ordering::Relaxed)
    }
}

impl Drop for ThemeSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
