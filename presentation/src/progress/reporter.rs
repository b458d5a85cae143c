//! Spinner naming the participant currently being resolved

use colored::Colorize;
use forum_domain::Identity;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Shows "<Name> is thinking..." while a reply is pending.
///
/// Output printed through [`ProgressReporter::println`] appears above the
/// spinner instead of being torn by it.
pub struct ProgressReporter {
    enabled: bool,
    current: Option<(Identity, ProgressBar)>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            enabled: true,
            current: None,
        }
    }

    /// A reporter that never draws anything
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            current: None,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Follow the resolving identity of the latest snapshot.
    pub fn update(&mut self, resolving: Option<Identity>) {
        if self.current.as_ref().map(|(identity, _)| *identity) == resolving {
            return;
        }
        self.clear();

        if let Some(identity) = resolving
            && self.enabled
        {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.set_message(format!("{} is thinking...", identity.display_name().bold()));
            pb.enable_steady_tick(Duration::from_millis(100));
            self.current = Some((identity, pb));
        }
    }

    pub fn println(&self, text: &str) {
        match &self.current {
            Some((_, pb)) => pb.suspend(|| println!("{}", text)),
            None => println!("{}", text),
        }
    }

    /// Remove the spinner, if any.
    pub fn clear(&mut self) {
        if let Some((_, pb)) = self.current.take() {
            pb.finish_and_clear();
        }
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.clear();
    }
}
