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

//! Script section parsing.
//!
//! Three line shapes:
//!
//! ```text
//! int Crystals=0            variable declaration
//! OpenGate::                event-chain declaration
//! msg:Gate opened;          command, inside the current chain
//! when(Crystals>=5)[OpenGate]   trigger, fires the named chain
//! ```
//!
//! This parser records structure, declaration lines, and every event or
//! variable reference with the line it occurred on. It does not resolve
//! references or enforce declaration order; those are validation rules,
//! and the grammar allows forward use in some runtime contexts, so the
//! ambiguity is reported downstream rather than guessed at here.

use crate::error::MldfError;
use crate::limits::Limits;
use crate::scanner::Section;

/// Declared script variable types.
const VAR_TYPES: &[&str] = &[
    "int", "float", "string", "bool", "miner", "vehicle", "building", "creature", "arrow", "timer",
];

/// A declared script variable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptVariable {
    /// Declared type keyword.
    pub var_type: String,
    /// Variable name.
    pub name: String,
    /// Initial value, verbatim.
    pub value: String,
    /// Declaration line (0-based, absolute).
    pub line: usize,
}

/// One command invocation inside an event chain.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptCommand {
    /// Command name.
    pub name: String,
    /// Raw parameter string (empty for bare commands).
    pub args: String,
    /// Line of the command (0-based, absolute).
    pub line: usize,
}

/// A named, ordered sequence of commands.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventChain {
    /// Chain name.
    pub name: String,
    /// Declaration line (0-based, absolute).
    pub line: usize,
    /// Commands in declaration order.
    pub commands: Vec<ScriptCommand>,
    /// Condition of the first trigger gating this chain, if any.
    pub trigger: Option<String>,
}

/// A standalone trigger line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptTrigger {
    /// `when` or `if`.
    pub keyword: String,
    /// Condition text inside the parentheses.
    pub condition: String,
    /// Fired target: an event-chain name, or an inline command.
    pub target: String,
    /// Line of the trigger (0-based, absolute).
    pub line: usize,
}

/// A recorded name reference with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptRef {
    /// Referenced name.
    pub name: String,
    /// Line of the reference (0-based, absolute).
    pub line: usize,
}

/// Parsed script section: variable table plus ordered event chains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptDocument {
    /// Variables in declaration order.
    pub variables: Vec<ScriptVariable>,
    /// Event chains in declaration order.
    pub chains: Vec<EventChain>,
    /// Standalone triggers in source order.
    pub triggers: Vec<ScriptTrigger>,
    /// Every event-chain reference (trigger targets, `call:` commands).
    pub event_refs: Vec<ScriptRef>,
    /// Every variable reference found in trigger conditions.
    pub var_refs: Vec<ScriptRef>,
}

impl ScriptDocument {
    /// Look up a variable declaration by name.
    pub fn variable(&self, name: &str) -> Option<&ScriptVariable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Look up an event chain by name (first declaration wins).
    pub fn chain(&self, name: &str) -> Option<&EventChain> {
        self.chains.iter().find(|c| c.name == name)
    }
}

/// Parse the `script` section.
pub fn parse_script(section: &Section, limits: &Limits) -> (ScriptDocument, Vec<MldfError>) {
    let mut script = ScriptDocument::default();
    let mut issues = Vec::new();
    let mut line_count = 0usize;

    for (line, text) in section.content_lines() {
        line_count += 1;
        if line_count > limits.max_script_lines {
            issues.push(
                MldfError::security(
                    format!("script too long: exceeds limit of {} lines", limits.max_script_lines),
                    line,
                )
                .with_section(&section.name),
            );
            break;
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(variable) = parse_variable_decl(trimmed, line) {
            script.variables.push(variable);
            continue;
        }

        if is_trigger_shaped(trimmed) {
            match parse_trigger(trimmed, line) {
                Some(trigger) => {
                    // A bracketed bare name references a chain; a target
                    // with ':' is an inline command, not a reference.
                    if !trigger.target.contains(':') && !trigger.target.is_empty() {
                        script.event_refs.push(ScriptRef {
                            name: trigger.target.clone(),
                            line,
                        });
                    }
                    for name in condition_identifiers(&trigger.condition) {
                        script.var_refs.push(ScriptRef { name, line });
                    }
                    script.triggers.push(trigger);
                }
                None => {
                    issues.push(
                        MldfError::script(format!("malformed trigger line: '{}'", trimmed), line)
                            .with_section(&section.name),
                    );
                }
            }
            continue;
        }

        if let Some((name, rest)) = parse_chain_decl(trimmed) {
            let mut chain = EventChain {
                name,
                line,
                commands: Vec::new(),
                trigger: None,
            };
            parse_commands(rest, line, &mut chain, &mut script.event_refs);
            script.chains.push(chain);
            continue;
        }

        // Plain command line: belongs to the most recent chain.
        match script.chains.last_mut() {
            Some(chain) => {
                let mut refs = Vec::new();
                parse_commands(trimmed, line, chain, &mut refs);
                script.event_refs.append(&mut refs);
            }
            None => {
                issues.push(
                    MldfError::script(
                        format!("command outside an event chain: '{}'", trimmed),
                        line,
                    )
                    .with_section(&section.name)
                    .warning(),
                );
            }
        }
    }

    // Attach the first matching trigger condition to each chain.
    for chain in &mut script.chains {
        chain.trigger = script
            .triggers
            .iter()
            .find(|t| t.target == chain.name)
            .map(|t| t.condition.clone());
    }

    (script, issues)
}

/// `type name=value` where `type` is a known variable type.
fn parse_variable_decl(trimmed: &str, line: usize) -> Option<ScriptVariable> {
    let (var_type, rest) = trimmed.split_once(char::is_whitespace)?;
    if !VAR_TYPES.contains(&var_type) {
        return None;
    }
    let rest = rest.trim();
    let (name, value) = rest.split_once('=')?;
    let name = name.trim();
    if !is_identifier(name) {
        return None;
    }
    Some(ScriptVariable {
        var_type: var_type.to_string(),
        name: name.to_string(),
        value: value.trim().trim_end_matches(';').to_string(),
        line,
    })
}

/// Whether a line is a trigger: `when`/`if` followed by a parenthesized
/// condition. A chain named `whenever` must not match.
fn is_trigger_shaped(trimmed: &str) -> bool {
    ["when", "if"].iter().any(|kw| {
        trimmed
            .strip_prefix(kw)
            .is_some_and(|rest| rest.trim_start().starts_with('('))
    })
}

/// `when(cond)[Target]` or `if(cond)(Target)`, optional trailing `;`.
fn parse_trigger(trimmed: &str, line: usize) -> Option<ScriptTrigger> {
    let keyword = if trimmed.starts_with("when") {
        "when"
    } else {
        "if"
    };
    let rest = trimmed[keyword.len()..].trim_start();
    if !rest.starts_with('(') {
        return None;
    }

    // Conditions may contain parentheses of their own.
    let mut depth = 0usize;
    let mut close = None;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close?;
    let condition = rest[1..close].trim().to_string();

    let tail = rest[close + 1..].trim().trim_end_matches(';').trim();
    let target = if (tail.starts_with('[') && tail.ends_with(']'))
        || (tail.starts_with('(') && tail.ends_with(')'))
    {
        tail[1..tail.len() - 1].trim().to_string()
    } else if tail.is_empty() {
        String::new()
    } else {
        return None;
    };

    Some(ScriptTrigger {
        keyword: keyword.to_string(),
        condition,
        target,
        line,
    })
}

/// `Name::` with optional same-line commands after the marker.
fn parse_chain_decl(trimmed: &str) -> Option<(String, &str)> {
    let marker = trimmed.find("::")?;
    let name = trimmed[..marker].trim();
    if !is_identifier(name) {
        return None;
    }
    Some((name.to_string(), trimmed[marker + 2..].trim()))
}

/// Append `;`-separated commands to a chain, collecting `call:` refs.
fn parse_commands(text: &str, line: usize, chain: &mut EventChain, event_refs: &mut Vec<ScriptRef>) {
    for segment in text.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (name, args) = match segment.split_once(':') {
            Some((n, a)) => (n.trim().to_string(), a.trim().to_string()),
            None => (segment.to_string(), String::new()),
        };
        if name == "call" && is_identifier(&args) {
            event_refs.push(ScriptRef {
                name: args.clone(),
                line,
            });
        }
        chain.commands.push(ScriptCommand { name, args, line });
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Pull identifier-shaped names out of a condition expression.
///
/// Numeric literals are skipped; keywords and builtin atoms are not,
/// because this module has no notion of which names the runtime
/// provides. Reference-resolution passes filter further.
pub fn condition_identifiers(condition: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = String::new();
    for c in condition.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            current.push(c);
        } else {
            flush_identifier(&mut current, &mut names);
        }
    }
    flush_identifier(&mut current, &mut names);
    names
}

fn flush_identifier(current: &mut String, names: &mut Vec<String>) {
    if !current.is_empty() {
        if current.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
            names.push(std::mem::take(current));
        } else {
            current.clear(); // numeric literal
        }
    }
}
