//! Lit element generator.

use super::templates::{normalize_output, TemplateEngine};
use super::GeneratedCode;
use crate::error::Result;
use crate::model::ComponentDescriptor;
use crate::options::LanguageVariant;
use serde::Serialize;

const TYPESCRIPT_TEMPLATE: &str = r#"import { LitElement, html, css } from 'lit';
import { customElement{{#if uses_property}}, property{{/if}} } from 'lit/decorators.js';
{{#each components}}

@customElement('{{tag}}')
export class {{class_name}} extends LitElement {
  static styles = css`
{{#each styles}}
    .{{selector}} {
{{#each declarations}}
      {{property}}: {{value}};
{{/each}}
    }
{{/each}}
  `;
{{#each properties}}

  @property({ type: {{lit_type}} })
  {{name}}: {{ts_type}} = {{default}};
{{/each}}
{{#each events}}

  private {{handler}}(event: {{payload_type}}) {
    this.dispatchEvent(
      new CustomEvent('{{name}}', { detail: event, bubbles: true, composed: true })
    );
  }
{{/each}}

  render() {
    return html`
{{indent markup 6}}
    `;
  }
}
{{/each}}
"#;

const JAVASCRIPT_TEMPLATE: &str = r#"import { LitElement, html, css } from 'lit';
{{#each components}}

export class {{class_name}} extends LitElement {
{{#if properties}}
  static properties = {
{{#each properties}}
    {{name}}: { type: {{lit_type}} },
{{/each}}
  };

{{/if}}
  static styles = css`
{{#each styles}}
    .{{selector}} {
{{#each declarations}}
      {{property}}: {{value}};
{{/each}}
    }
{{/each}}
  `;
{{#if properties}}

  constructor() {
    super();
{{#each properties}}
    this.{{name}} = {{default}};
{{/each}}
  }
{{/if}}
{{#each events}}

  {{handler}}(event) {
    this.dispatchEvent(
      new CustomEvent('{{name}}', { detail: event, bubbles: true, composed: true })
    );
  }
{{/each}}

  render() {
    return html`
{{indent markup 6}}
    `;
  }
}

customElements.define('{{tag}}', {{class_name}});
{{/each}}
"#;

/// A component ready for assembly: descriptor plus rendered markup.
#[derive(Debug, Clone, Copy)]
pub struct RenderedComponent<'a> {
    pub descriptor: &'a ComponentDescriptor,
    pub markup: &'a str,
}

#[derive(Serialize)]
struct FileView {
    uses_property: bool,
    components: Vec<ComponentView>,
}

#[derive(Serialize)]
struct ComponentView {
    tag: String,
    class_name: String,
    styles: Vec<RuleView>,
    properties: Vec<PropertyView>,
    events: Vec<EventView>,
    markup: String,
}

#[derive(Serialize)]
struct RuleView {
    selector: String,
    declarations: Vec<DeclarationView>,
}

#[derive(Serialize)]
struct DeclarationView {
    property: String,
    value: String,
}

#[derive(Serialize)]
struct PropertyView {
    name: String,
    lit_type: &'static str,
    ts_type: &'static str,
    default: String,
}

#[derive(Serialize)]
struct EventView {
    name: String,
    handler: String,
    payload_type: &'static str,
}

impl ComponentView {
    fn new(component: &RenderedComponent<'_>) -> Self {
        let descriptor = component.descriptor;
        Self {
            tag: descriptor.tag.clone(),
            class_name: descriptor.class_name.clone(),
            styles: descriptor
                .styles
                .iter()
                .map(|rule| RuleView {
                    selector: rule.selector.clone(),
                    declarations: rule
                        .declarations
                        .iter()
                        .map(|(property, value)| DeclarationView {
                            property: property.clone(),
                            value: value.clone(),
                        })
                        .collect(),
                })
                .collect(),
            properties: descriptor
                .properties
                .iter()
                .map(|token| PropertyView {
                    name: token.name.clone(),
                    lit_type: token.property_type.to_lit(),
                    ts_type: token.property_type.to_typescript(),
                    default: token.default.to_js(),
                })
                .collect(),
            events: descriptor
                .events
                .iter()
                .map(|event| EventView {
                    name: event.name.clone(),
                    handler: event.handler.clone(),
                    payload_type: event.payload_type,
                })
                .collect(),
            markup: component.markup.to_string(),
        }
    }
}

/// Lit element generator.
pub struct LitGenerator<'a> {
    engine: TemplateEngine<'a>,
}

impl<'a> LitGenerator<'a> {
    /// Create a generator with the TypeScript and JavaScript templates.
    pub fn new() -> Result<Self> {
        let mut engine = TemplateEngine::new();
        for (variant, template) in [
            (LanguageVariant::TypeScript, TYPESCRIPT_TEMPLATE),
            (LanguageVariant::JavaScript, JAVASCRIPT_TEMPLATE),
        ] {
            engine.register_template(variant.template_name(), template)?;
        }
        Ok(Self { engine })
    }

    /// Assemble one payload holding every component, root first.
    pub fn generate(
        &self,
        variant: LanguageVariant,
        components: &[RenderedComponent<'_>],
    ) -> Result<GeneratedCode> {
        let view = FileView {
            uses_property: components
                .iter()
                .any(|component| !component.descriptor.properties.is_empty()),
            components: components.iter().map(ComponentView::new).collect(),
        };

        let rendered = self.engine.render(variant.template_name(), &view)?;
        Ok(GeneratedCode {
            language: variant.label().to_string(),
            title: variant.title().to_string(),
            code: normalize_output(&rendered),
        })
    }
}
