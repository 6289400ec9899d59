// Dweve MLDF - Mining Level Data Format
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Validation runner.

use crate::diagnostic::{Diagnostic, Severity};
use crate::rules::{default_rules, LintContext, LintRule, RuleConfig};
use mldf_core::MldfDocument;
use std::collections::HashMap;

/// Maximum number of diagnostics to collect before stopping.
///
/// A hostile document can make every cell of a huge grid invalid; the
/// cap keeps the diagnostic list bounded while leaving more than enough
/// to work with.
const MAX_DIAGNOSTICS: usize = 10_000;

/// Configuration for the validation runner.
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// Rule configurations by rule ID.
    pub rules: HashMap<String, RuleConfig>,
    /// Minimum severity to report.
    pub min_severity: Severity,
    /// Maximum number of diagnostics to collect (default: 10,000).
    pub max_diagnostics: usize,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
            min_severity: Severity::Warning,
            max_diagnostics: MAX_DIAGNOSTICS,
        }
    }
}

impl LintConfig {
    /// Validate configuration (checks rule ID lengths and limits).
    pub fn validate(&self) -> Result<(), String> {
        const MAX_RULE_ID_LENGTH: usize = 100;
        const MAX_RULES: usize = 1000;

        if self.rules.len() > MAX_RULES {
            return Err(format!(
                "Too many rule configurations: {} (max: {})",
                self.rules.len(),
                MAX_RULES
            ));
        }
        for id in self.rules.keys() {
            if id.is_empty() {
                return Err("Empty rule ID not allowed".to_string());
            }
            if id.len() > MAX_RULE_ID_LENGTH {
                return Err(format!(
                    "Rule ID too long: {} bytes (max: {})",
                    id.len(),
                    MAX_RULE_ID_LENGTH
                ));
            }
        }
        Ok(())
    }

    /// Disable a specific rule.
    pub fn disable_rule(&mut self, rule_id: &str) {
        self.rules.insert(
            rule_id.to_string(),
            RuleConfig {
                enabled: false,
                error: false,
            },
        );
    }

    /// Enable a specific rule.
    pub fn enable_rule(&mut self, rule_id: &str) {
        self.rules.insert(
            rule_id.to_string(),
            RuleConfig {
                enabled: true,
                error: false,
            },
        );
    }

    /// Escalate a rule's warnings to errors.
    pub fn set_rule_error(&mut self, rule_id: &str) {
        self.rules.insert(
            rule_id.to_string(),
            RuleConfig {
                enabled: true,
                error: true,
            },
        );
    }
}

/// Validation runner.
pub struct LintRunner {
    config: LintConfig,
    rules: Vec<Box<dyn LintRule>>,
}

impl LintRunner {
    /// Create a new runner with the default rules.
    pub fn new(config: LintConfig) -> Self {
        Self {
            config,
            rules: default_rules(),
        }
    }

    /// Create a runner with custom rules.
    pub fn with_rules(config: LintConfig, rules: Vec<Box<dyn LintRule>>) -> Self {
        Self { config, rules }
    }

    /// Add a custom rule.
    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    /// Run all enabled rules over the published game tile table.
    pub fn run(&self, doc: &MldfDocument) -> Vec<Diagnostic> {
        self.run_with_context(doc, &LintContext::game_default())
    }

    /// Run all enabled rules with an injected tile table.
    ///
    /// Diagnostics are capped at `config.max_diagnostics`; when the cap
    /// is hit, a final warning notes the truncation and remaining rules
    /// are skipped.
    pub fn run_with_context(&self, doc: &MldfDocument, context: &LintContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut limit_exceeded = false;

        for rule in &self.rules {
            if diagnostics.len() >= self.config.max_diagnostics {
                limit_exceeded = true;
                break;
            }

            let rule_id = rule.id();
            let rule_config = self.config.rules.get(rule_id).cloned().unwrap_or_default();
            if !rule_config.enabled {
                continue;
            }

            let mut rule_diagnostics = rule.check(doc, context);
            if rule_config.error {
                for diagnostic in &mut rule_diagnostics {
                    diagnostic.escalate_to_error();
                }
            }
            rule_diagnostics.retain(|d| d.severity() >= self.config.min_severity);

            let remaining = self.config.max_diagnostics.saturating_sub(diagnostics.len());
            if rule_diagnostics.len() > remaining {
                rule_diagnostics.truncate(remaining);
                limit_exceeded = true;
            }
            diagnostics.extend(rule_diagnostics);
        }

        if limit_exceeded {
            diagnostics.push(Diagnostic::warning(
                crate::diagnostic::DiagnosticKind::Custom("max-diagnostics".to_string()),
                format!(
                    "diagnostic limit of {} reached; further findings suppressed",
                    self.config.max_diagnostics
                ),
                "runner",
            ));
        }

        diagnostics
    }
}
