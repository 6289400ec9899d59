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

//! Security limits for MLDF parsing.
//!
//! Level files come from untrusted sources (workshop downloads, editor
//! buffers mid-edit), so the parser bounds every dimension that could
//! otherwise exhaust memory. Exceeding `max_file_size` or
//! `max_line_length` fails preprocessing outright; the per-section limits
//! degrade to a section-level issue so the rest of the document still
//! parses.

/// Security limits enforced during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input size in bytes (default: 256MB).
    pub max_file_size: usize,
    /// Maximum line length in bytes (default: 1MB).
    pub max_line_length: usize,
    /// Maximum cells in a single grid section (default: 16M).
    pub max_grid_cells: usize,
    /// Maximum number of sections (default: 1,000).
    pub max_sections: usize,
    /// Maximum entities per collection (default: 100,000).
    pub max_entities: usize,
    /// Maximum lines in a script section (default: 1M).
    pub max_script_lines: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size: 256 * 1024 * 1024,
            max_line_length: 1024 * 1024,
            max_grid_cells: 16 * 1024 * 1024,
            max_sections: 1_000,
            max_entities: 100_000,
            max_script_lines: 1_000_000,
        }
    }
}

impl Limits {
    /// Restrictive limits suitable for interactive editor use.
    pub fn strict() -> Self {
        Self {
            max_file_size: 16 * 1024 * 1024,
            max_line_length: 64 * 1024,
            max_grid_cells: 1024 * 1024,
            max_sections: 100,
            max_entities: 10_000,
            max_script_lines: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_file_size, 256 * 1024 * 1024);
        assert_eq!(limits.max_line_length, 1024 * 1024);
        assert_eq!(limits.max_grid_cells, 16 * 1024 * 1024);
        assert_eq!(limits.max_sections, 1_000);
        assert_eq!(limits.max_entities, 100_000);
        assert_eq!(limits.max_script_lines, 1_000_000);
    }

    #[test]
    fn test_strict_limits_smaller_than_default() {
        let strict = Limits::strict();
        let default = Limits::default();
        assert!(strict.max_file_size < default.max_file_size);
        assert!(strict.max_grid_cells < default.max_grid_cells);
        assert!(strict.max_sections < default.max_sections);
    }

    #[test]
    fn test_limits_clone_eq() {
        let limits = Limits::default();
        assert_eq!(limits, limits.clone());
    }
}
