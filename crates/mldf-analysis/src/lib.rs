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

//! Reachability and accessibility analysis for MLDF levels.
//!
//! Answers the question the validator cannot: is the map *playable* in
//! practice? Can the player actually reach the crystals, the objective
//! tiles, the far caverns from the starting position? The analyzer
//! builds a traversability graph from the tile grid, BFS-floods it from
//! the origin, and derives:
//!
//! - the reachable tile set with BFS distances,
//! - the accessibility ratio (reachable floor / total floor),
//! - isolated floor regions the player can never enter,
//! - choke points whose collapse would split the map.
//!
//! ```rust
//! use mldf_core::parse;
//! use mldf_analysis::{analyze, AnalyzeOptions};
//!
//! let parsed = parse("info{\nrowcount:1;\ncolcount:2;\n}\ntiles{\n1,1,\n}").unwrap();
//! let result = analyze(&parsed.document, &AnalyzeOptions::walking());
//! assert_eq!(result.accessibility_ratio, 1.0);
//! ```
//!
//! Deterministic by contract: the same document and options always
//! produce an identical [`ReachabilityResult`].

mod choke;
mod reachability;
mod traversal;

pub use reachability::{analyze, analyze_with_table, ReachabilityResult};
pub use traversal::AnalyzeOptions;
