//! Prompt template rendering.
//!
//! A `PromptTemplate` substitutes `{name}` placeholders with supplied
//! variables. Missing variables are an error; extra supplied variables are
//! ignored. Literal braces are written as `{{` and `}}`.

use std::collections::HashMap;

use weft_types::error::PromptError;

/// A prompt template with `{name}` placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The raw template text.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Substitute placeholders with the given variables.
    pub fn render(&self, vars: &HashMap<&str, String>) -> Result<String, PromptError> {
        let mut out = String::with_capacity(self.template.len());
        let mut chars = self.template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    if chars.peek() == Some(&'{') {
                        chars.next();
                        out.push('{');
                        continue;
                    }
                    let mut name = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        name.push(inner);
                    }
                    if !closed {
                        return Err(PromptError::UnclosedPlaceholder);
                    }
                    let name = name.trim();
                    match vars.get(name) {
                        Some(value) => out.push_str(value),
                        None => return Err(PromptError::MissingVariable(name.to_string())),
                    }
                }
                '}' => {
                    if chars.peek() == Some(&'}') {
                        chars.next();
                    }
                    out.push('}');
                }
                other => out.push(other),
            }
        }

        Ok(out)
    }
}
