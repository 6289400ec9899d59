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

//! Validation diagnostic types.
//!
//! Kinds carry the coordinates of what they describe (offending row,
//! cell, colliding ID) so downstream consumers, the quick-fix engine in
//! particular, can act on a diagnostic without re-parsing the source.

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Warning - might be an issue.
    Warning,
    /// Error - the map is not well-formed or not playable.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Kind of diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A required section is absent.
    MissingSection { name: String },
    /// Grid row count does not match `info.rowcount`.
    GridRowCount {
        section: String,
        expected: usize,
        actual: usize,
    },
    /// One grid row's length does not match `info.colcount`.
    GridRowLength {
        section: String,
        /// 0-based row index within the grid.
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// A tile cell holds a code outside the known-valid table.
    InvalidTileCode { row: usize, col: usize, code: u16 },
    /// No Tool Store building is placed.
    MissingToolStore,
    /// An objective references a tile outside the grid.
    ObjectiveOutOfBounds { row: usize, col: usize },
    /// An objective condition references an undeclared script variable.
    UndeclaredVariable { name: String },
    /// Two entities in one collection share an `ID=`.
    IdCollision { collection: String, id: String },
    /// A top-level section name is not in the known set.
    UnknownSection { name: String },
    /// A trigger or call references an undeclared event chain.
    UndeclaredEvent { name: String },
    /// An event chain is declared more than once.
    DuplicateEvent { name: String },
    /// A script variable is referenced before its declaration line.
    UseBeforeDeclaration { name: String },
    /// Custom rule violation.
    Custom(String),
}

/// A validation diagnostic.
///
/// Never mutates the document it describes; positions are 0-based
/// document lines so callers can place diagnostics back onto the source
/// without re-parsing.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    kind: DiagnosticKind,
    message: String,
    line: Option<usize>,
    column: Option<usize>,
    section: Option<String>,
    rule_id: String,
}

impl Diagnostic {
    pub fn warning(
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            message: message.into(),
            line: None,
            column: None,
            section: None,
            rule_id: rule_id.into(),
        }
    }

    pub fn error(
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message: message.into(),
            line: None,
            column: None,
            section: None,
            rule_id: rule_id.into(),
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    // Public getters
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    /// Escalate the severity to error level (used by the lint runner).
    pub fn escalate_to_error(&mut self) {
        self.severity = Severity::Error;
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {}: ", line)?;
        }
        write!(f, "[{}] {}: {}", self.rule_id, self.severity, self.message)?;
        if let Some(ref section) = self.section {
            write!(f, " (in {})", section)?;
        }
        Ok(())
    }
}
