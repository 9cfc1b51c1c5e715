/*!
 * Rule engine.
 *
 * Runs the rules a settings file enables for a language over one file's
 * cues. Output order is fixed: rules in settings order, and within a rule
 * whatever order the check reports (cues, then lines). Nothing is
 * deduplicated.
 *
 * Rule names the registry does not know are skipped, never an error. What
 * happens when a check panics is decided by the `FailurePolicy`.
 */

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, error};

use super::profiles::LanguageProfiles;
use super::registry::RuleRegistry;
use super::{CheckContext, Violation};
use crate::app_config::Settings;
use crate::subtitle_processor::Cue;

/// What to do when a check panics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Let the panic unwind to the caller
    #[default]
    Propagate,
    /// Catch it, report it to the observer and continue with the next rule
    Isolate,
}

/// Receives engine events; every method is optional
pub trait CheckObserver: Send + Sync {
    /// A rule is about to run
    fn rule_started(&self, _rule: &str, _file_name: &str) {}

    /// A rule finished and produced `_violations` results
    fn rule_finished(&self, _rule: &str, _file_name: &str, _violations: usize) {}

    /// A configured rule was not run
    fn rule_skipped(&self, _rule: &str, _reason: &str) {}

    /// A rule panicked under `FailurePolicy::Isolate`
    fn rule_failed(&self, _rule: &str, _file_name: &str, _message: &str) {}
}

/// Observer forwarding engine events to the `log` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl CheckObserver for LogObserver {
    fn rule_started(&self, rule: &str, file_name: &str) {
        debug!("Running rule '{}' on {}", rule, file_name);
    }

    fn rule_finished(&self, rule: &str, file_name: &str, violations: usize) {
        debug!("Rule '{}' found {} issue(s) in {}", rule, violations, file_name);
    }

    fn rule_skipped(&self, rule: &str, reason: &str) {
        debug!("Skipping rule '{}': {}", rule, reason);
    }

    fn rule_failed(&self, rule: &str, file_name: &str, message: &str) {
        error!("Rule '{}' failed on {}: {}", rule, file_name, message);
    }
}

/// Dispatches enabled rules to registered checks
#[derive(Clone)]
pub struct RuleEngine {
    registry: Arc<RuleRegistry>,
    profiles: Arc<LanguageProfiles>,
    observer: Option<Arc<dyn CheckObserver>>,
    policy: FailurePolicy,
}

impl RuleEngine {
    /// Create an engine with no observer and `FailurePolicy::Propagate`
    pub fn new(registry: RuleRegistry, profiles: LanguageProfiles) -> Self {
        Self {
            registry: Arc::new(registry),
            profiles: Arc::new(profiles),
            observer: None,
            policy: FailurePolicy::default(),
        }
    }

    /// Attach an observer
    pub fn with_observer(mut self, observer: Arc<dyn CheckObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Set the failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The registry this engine dispatches to
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// The language tables passed to every check
    pub fn profiles(&self) -> &LanguageProfiles {
        &self.profiles
    }

    /// Canonical names of the rules that would run for a language
    pub fn active_rules(&self, settings: &Settings, language: &str) -> Vec<&'static str> {
        settings
            .errors
            .iter()
            .filter(|rule| rule.is_enabled(language))
            .filter_map(|rule| self.registry.get(&rule.name))
            .map(|check| check.name())
            .collect()
    }

    /// Run every rule enabled for `language` over the cues
    pub fn check(&self, cues: &[Cue], language: &str, file_name: &str, settings: &Settings) -> Vec<Violation> {
        let ctx = CheckContext::new(language, file_name, &self.profiles);
        let mut violations = Vec::new();

        for rule in &settings.errors {
            if !rule.is_enabled(language) {
                continue;
            }

            let Some(check) = self.registry.get(&rule.name) else {
                if let Some(observer) = &self.observer {
                    observer.rule_skipped(&rule.name, "unknown rule");
                }
                continue;
            };

            if let Some(observer) = &self.observer {
                observer.rule_started(check.name(), file_name);
            }

            let found = match self.policy {
                FailurePolicy::Propagate => check.evaluate(cues, &ctx),
                FailurePolicy::Isolate => {
                    match panic::catch_unwind(AssertUnwindSafe(|| check.evaluate(cues, &ctx))) {
                        Ok(found) => found,
                        Err(payload) => {
                            let message = panic_message(payload.as_ref());
                            match &self.observer {
                                Some(observer) => observer.rule_failed(check.name(), file_name, &message),
                                None => error!("Rule '{}' failed on {}: {}", check.name(), file_name, message),
                            }
                            continue;
                        }
                    }
                }
            };

            if let Some(observer) = &self.observer {
                observer.rule_finished(check.name(), file_name, found.len());
            }
            violations.extend(found);
        }

        violations
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
