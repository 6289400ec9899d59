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

//! Per-section semantic parsers.
//!
//! Each parser consumes one [`crate::scanner::Section`]'s content and
//! returns typed data plus collected issues. A parse problem in one
//! section never aborts the others; document assembly stitches the
//! results together.

pub mod entities;
pub mod grid;
pub mod info;
pub mod objectives;
pub mod resources;
pub mod script;
