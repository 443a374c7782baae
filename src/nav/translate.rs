//! Opens the third-party translation dropdown once its widget shows up.
//!
//! The widget is injected asynchronously by an external script, so the
//! lookup is polled: one immediate attempt, then up to
//! [`RetryPolicy::max_retries`] more spaced by [`RetryPolicy::interval`].
//! Never finding it is a normal outcome. Dropping the returned future
//! cancels any pending retry.

use std::time::Duration;

use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            interval: Duration::from_millis(300),
        }
    }
}

pub trait DropdownWidget {
    fn focus(&mut self);
    fn click(&mut self);
    fn press_arrow_down(&mut self);
}

/// Page the widget lives in.
pub trait WidgetHost {
    type Widget: DropdownWidget;

    fn find_widget(&mut self) -> Option<Self::Widget>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownOutcome {
    Opened { attempts: u32 },
    NotFound { attempts: u32 },
}

pub async fn open_translate_dropdown<H: WidgetHost>(
    host: &mut H,
    policy: RetryPolicy,
) -> DropdownOutcome {
    let mut attempts = 0;
    loop {
        attempts += 1;
        if let Some(mut widget) = host.find_widget() {
            widget.focus();
            widget.click();
            widget.press_arrow_down();
            info!(attempts, "translation dropdown opened");
            return DropdownOutcome::Opened { attempts };
        }
        if attempts > policy.max_retries {
            debug!(attempts, "translation widget never appeared");
            return DropdownOutcome::NotFound { attempts };
        }
        tokio::time::sleep(policy.interval).await;
    }
}
