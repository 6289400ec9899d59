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

//! Error types for MLDF parsing.
//!
//! All line and column numbers are 0-based, matching editor positions and
//! the `Section` span convention. Recoverable issues are collected into
//! `Parsed::issues` rather than returned as `Err`; only structurally
//! unreadable input produces a hard failure from `parse`.

use std::fmt;
use thiserror::Error;

/// The kind of issue that occurred during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MldfErrorKind {
    /// Lexical or structural violation.
    Syntax,
    /// Malformed section (unbalanced braces, missing name).
    Section,
    /// Unparsable numeric field.
    Number,
    /// Malformed grid row or cell.
    Grid,
    /// Malformed entity line.
    Entity,
    /// Malformed or unrecognized objective line.
    Objective,
    /// Malformed script line.
    Script,
    /// Duplicate name where one was expected.
    Collision,
    /// Security limit exceeded.
    Security,
    /// Structurally empty/unreadable input.
    Empty,
}

/// How serious a collected parse issue is.
///
/// Errors mean the affected data was dropped or defaulted; warnings mean
/// the data was kept but looks suspicious. Neither aborts parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IssueSeverity {
    /// Suspicious but recovered-in-place.
    Warning,
    /// Data lost or defaulted.
    Error,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl fmt::Display for MldfErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "SyntaxError"),
            Self::Section => write!(f, "SectionError"),
            Self::Number => write!(f, "NumberError"),
            Self::Grid => write!(f, "GridError"),
            Self::Entity => write!(f, "EntityError"),
            Self::Objective => write!(f, "ObjectiveError"),
            Self::Script => write!(f, "ScriptError"),
            Self::Collision => write!(f, "CollisionError"),
            Self::Security => write!(f, "SecurityError"),
            Self::Empty => write!(f, "EmptyError"),
        }
    }
}

/// An issue raised while parsing an MLDF document.
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} at line {line}: {message}")]
pub struct MldfError {
    /// The kind of issue.
    pub kind: MldfErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Line number (0-based).
    pub line: usize,
    /// Column number (0-based, optional).
    pub column: Option<usize>,
    /// Section the issue belongs to, when known (lowercase name).
    pub section: Option<String>,
    /// Issue severity (errors drop/default data, warnings keep it).
    pub severity: IssueSeverity,
}

impl MldfError {
    /// Create a new issue.
    pub fn new(kind: MldfErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            column: None,
            section: None,
            severity: IssueSeverity::Error,
        }
    }

    /// Add column information.
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Tag the issue with the section it was found in.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Downgrade the issue to a warning.
    pub fn warning(mut self) -> Self {
        self.severity = IssueSeverity::Warning;
        self
    }

    // Convenience constructors for each issue kind
    pub fn syntax(message: impl Into<String>, line: usize) -> Self {
        Self::new(MldfErrorKind::Syntax, message, line)
    }

    pub fn section(message: impl Into<String>, line: usize) -> Self {
        Self::new(MldfErrorKind::Section, message, line)
    }

    pub fn number(message: impl Into<String>, line: usize) -> Self {
        Self::new(MldfErrorKind::Number, message, line)
    }

    pub fn grid(message: impl Into<String>, line: usize) -> Self {
        Self::new(MldfErrorKind::Grid, message, line)
    }

    pub fn entity(message: impl Into<String>, line: usize) -> Self {
        Self::new(MldfErrorKind::Entity, message, line)
    }

    pub fn objective(message: impl Into<String>, line: usize) -> Self {
        Self::new(MldfErrorKind::Objective, message, line)
    }

    pub fn script(message: impl Into<String>, line: usize) -> Self {
        Self::new(MldfErrorKind::Script, message, line)
    }

    pub fn collision(message: impl Into<String>, line: usize) -> Self {
        Self::new(MldfErrorKind::Collision, message, line)
    }

    pub fn security(message: impl Into<String>, line: usize) -> Self {
        Self::new(MldfErrorKind::Security, message, line)
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self::new(MldfErrorKind::Empty, message, 0)
    }
}

/// Result type for MLDF operations.
pub type MldfResult<T> = Result<T, MldfError>;
