//! Re-renders the model's reply as plain text, XML and JSON.

use super::UserInputs;
use serde::{Deserialize, Serialize};

/// How role, context and reply are placed inside the XML view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum XmlMode {
    /// Interpolate verbatim. Special characters can yield invalid XML.
    #[default]
    Literal,
    /// Replace `& < > " '` with their predefined entities.
    Escaped,
}

impl XmlMode {
    pub fn from_escape_flag(escape: bool) -> Self {
        if escape { Self::Escaped } else { Self::Literal }
    }
}

/// JSON view. Field order is the key order of the serialized object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedPromptJson {
    pub role: String,
    pub context: String,
    pub enhanced_prompt: String,
}

impl EnhancedPromptJson {
    pub fn to_json_string(&self) -> String {
        // Serializing plain string fields cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn to_json_string_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedOutput {
    pub plain: String,
    pub xml: String,
    pub json: EnhancedPromptJson,
}

pub fn render(inputs: &UserInputs, result: &str, mode: XmlMode) -> RenderedOutput {
    RenderedOutput {
        plain: result.to_string(),
        xml: render_xml(inputs, result, mode),
        json: EnhancedPromptJson {
            role: inputs.role.clone(),
            context: inputs.context.clone(),
            enhanced_prompt: result.to_string(),
        },
    }
}

pub fn render_xml(inputs: &UserInputs, result: &str, mode: XmlMode) -> String {
    let text = |s: &str| match mode {
        XmlMode::Literal => s.to_string(),
        XmlMode::Escaped => escape_xml(s),
    };

    format!(
        "<prompt>\n  <role>{}</role>\n  <context>{}</context>\n  <task>\n    {}\n  </task>\n</prompt>\n",
        text(&inputs.role),
        text(&inputs.context),
        text(result)
    )
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
