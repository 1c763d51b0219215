// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `{field}` template expansion against a context.
//!
//! Processor arguments embed context fields with `{name}` placeholders;
//! `{{` and `}}` escape literal braces. Substitution happens immediately
//! before each processor invocation, so templates always see the current
//! state of the context.

use crate::Context;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown field in template: {0}")]
    UnknownField(String),
    #[error("unbalanced brace in template: {0}")]
    Unbalanced(String),
}

/// Expand `{field}` placeholders with rendered values from the context.
///
/// A placeholder naming an absent field is an error; the invoking
/// processor fails and the engine turns that into an aborted chain.
pub fn expand(template: &str, ctx: &Context) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => name.push(ch),
                        None => return Err(TemplateError::Unbalanced(template.to_string())),
                    }
                }
                match ctx.render_field(&name) {
                    Some(value) => out.push_str(&value),
                    None => return Err(TemplateError::UnknownField(name)),
                }
            }
            '}' => {
                // A doubled `}}` is an escaped brace; a bare `}` passes through.
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
