//! Template engine for code generation.

use crate::error::{CodegenError, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Template engine using Handlebars.
///
/// Output is source code, so HTML escaping is disabled.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create a new template engine.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);

        // Register custom helpers
        Self::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Whether a template is registered under `name`.
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Render a template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Render a template string directly.
    pub fn render_string<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.handlebars
            .render_template(template, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Register custom helpers.
    fn register_helpers(handlebars: &mut Handlebars) {
        // Indent every non-blank line of a block: {{indent text spaces}}
        handlebars.register_helper(
            "indent",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let content = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    let spaces = h
                        .param(1)
                        .and_then(|v| v.value().as_u64())
                        .unwrap_or(4) as usize;
                    out.write(&indent(content, spaces))?;
                    Ok(())
                },
            ),
        );
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}

fn indent(content: &str, spaces: usize) -> String {
    let prefix = " ".repeat(spaces);
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Minimal clean-up of rendered code: trailing whitespace removed, runs of
/// blank lines collapsed, exactly one trailing newline.
pub fn normalize_output(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut blank_run = true;
    for line in code.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            if blank_run {
                continue;
            }
            blank_run = true;
        } else {
            blank_run = false;
        }
        out.push_str(line);
        out.push('\n');
    }
    while out.ends_with("\n\n") {
        out.pop();
    }
    if out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_simple() {
        let mut engine = TemplateEngine::new();
        engine
            .register_template("hello", "Hello, {{name}}!")
            .unwrap();

        let result = engine.render("hello", &json!({"name": "World"})).unwrap();
        assert_eq!(result, "Hello, World!");
        assert!(engine.has_template("hello"));
    }

    #[test]
    fn test_no_html_escaping() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string("{{markup}}", &json!({"markup": "<div class=\"a\">${this.x}</div>"}))
            .unwrap();
        assert_eq!(result, "<div class=\"a\">${this.x}</div>");
    }

    #[test]
    fn test_indent_helper() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string("{{indent body 2}}", &json!({"body": "<a>\n\n<b>"}))
            .unwrap();
        assert_eq!(result, "  <a>\n\n  <b>");
    }

    #[test]
    fn test_invalid_template() {
        let mut engine = TemplateEngine::new();
        let err = engine.register_template("broken", "{{#each items}}").unwrap_err();
        assert!(matches!(err, CodegenError::InvalidTemplate(_)));
    }

    #[test]
    fn test_normalize_output() {
        assert_eq!(normalize_output("\n\na  \n\n\n\nb\t\n\n"), "a\n\nb\n");
        assert_eq!(normalize_output(""), "\n");
    }
}
