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

//! MLDF structural validation.
//!
//! Checks a parsed [`MldfDocument`] for well-formedness (required
//! sections, dimension consistency, valid tile codes) and playability
//! (Tool Store present, resolvable objective and script references).
//! Diagnostics are advisory: the document stays usable either way.
//!
//! ## Quick Start
//!
//! ```rust
//! use mldf_core::parse;
//! use mldf_lint::{validate, Severity};
//!
//! let parsed = parse("info{\nrowcount:1;\ncolcount:1;\n}\ntiles{\n1,\n}").unwrap();
//! for diag in validate(&parsed.document) {
//!     if diag.severity() == Severity::Error {
//!         eprintln!("{}", diag);
//!     }
//! }
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use mldf_core::parse;
//! use mldf_lint::{validate_with_config, LintConfig, Severity};
//!
//! let parsed = parse("tiles{\n1,\n}").unwrap();
//! let mut config = LintConfig::default();
//! config.disable_rule("tool-store");
//! config.set_rule_error("unknown-sections");
//! let diagnostics = validate_with_config(&parsed.document, config);
//! ```

mod diagnostic;
mod rules;
mod runner;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use rules::{default_rules, LintContext, LintRule, RuleConfig};
pub use runner::{LintConfig, LintRunner};

use mldf_core::MldfDocument;

/// Run all default validation rules on a document.
///
/// Output is sorted by line for presentation; the set of findings does
/// not depend on rule order.
pub fn validate(doc: &MldfDocument) -> Vec<Diagnostic> {
    validate_with_config(doc, LintConfig::default())
}

/// Run validation with a custom configuration.
pub fn validate_with_config(doc: &MldfDocument, config: LintConfig) -> Vec<Diagnostic> {
    let runner = LintRunner::new(config);
    let mut diagnostics = runner.run(doc);
    diagnostics.sort_by_key(|d| (d.line(), d.rule_id().to_string()));
    diagnostics
}
