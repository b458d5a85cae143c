//! Printing a live session from its snapshot stream

use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use colored::Colorize;
use forum_domain::{ChatSnapshot, Identity, Message, MessageId};
use tokio::sync::watch;

/// Tracks which transcript entries have already been shown.
///
/// A restart or clear replaces the log; the feed notices through the first
/// message id and starts over.
#[derive(Debug, Default)]
pub struct MessageFeed {
    shown: usize,
    first: Option<MessageId>,
}

impl MessageFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries of `snapshot` not returned by an earlier call.
    pub fn fresh<'a>(&mut self, snapshot: &'a ChatSnapshot) -> &'a [Message] {
        let first = snapshot.messages.first().map(|m| m.id);
        if first != self.first || snapshot.messages.len() < self.shown {
            self.first = first;
            self.shown = 0;
        }
        let fresh = &snapshot.messages[self.shown..];
        self.shown = snapshot.messages.len();
        fresh
    }
}

/// How pending replies are indicated
pub enum Indicator {
    /// Animated spinner (headless runs)
    Spinner(ProgressReporter),
    /// One dimmed line per resolution (interactive prompt)
    Line,
    Silent,
}

/// Renders snapshots to stdout: new messages, halts, and the thinking indicator.
pub struct SessionPrinter {
    feed: MessageFeed,
    indicator: Indicator,
    resolving: Option<Identity>,
    last_error: Option<String>,
}

impl SessionPrinter {
    pub fn new(indicator: Indicator) -> Self {
        Self {
            feed: MessageFeed::new(),
            indicator,
            resolving: None,
            last_error: None,
        }
    }

    fn print(&self, text: &str) {
        match &self.indicator {
            Indicator::Spinner(progress) => progress.println(text),
            Indicator::Line | Indicator::Silent => println!("{}", text),
        }
    }

    pub fn render(&mut self, snapshot: &ChatSnapshot) {
        for message in self.feed.fresh(snapshot) {
            self.print(&ConsoleFormatter::message(message));
        }

        // A halt sets the error and stops the session in one step.
        if snapshot.last_error != self.last_error {
            if let Some(reason) = &snapshot.last_error
                && !snapshot.is_running
            {
                self.print(&ConsoleFormatter::halted(reason));
            }
            self.last_error = snapshot.last_error.clone();
        }

        if snapshot.resolving != self.resolving {
            self.resolving = snapshot.resolving;
            match &mut self.indicator {
                Indicator::Spinner(progress) => progress.update(snapshot.resolving),
                Indicator::Line => {
                    if let Some(identity) = snapshot.resolving {
                        println!("{}", format!("{} is thinking...", identity).dimmed());
                    }
                }
                Indicator::Silent => {}
            }
        }
    }

    /// Render every published snapshot until the channel closes.
    pub async fn follow(mut self, mut rx: watch::Receiver<ChatSnapshot>) {
        loop {
            let snapshot = rx.borrow_and_update().clone();
            self.render(&snapshot);
            if rx.changed().await.is_err() {
                break;
            }
        }
    }
}
