//! Server-side HTML for the single form page.

use crate::{
    SubmissionError,
    enhance::{RenderedOutput, UserInputs},
};

/// What the page shows below the form after a submission.
pub enum Outcome<'a> {
    Blank,
    Rendered(&'a RenderedOutput),
    Failed(&'a SubmissionError),
}

const STYLE: &str = "body{font-family:sans-serif;max-width:760px;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:1rem;font-weight:600}\
input,textarea{width:100%;box-sizing:border-box;padding:.5rem}\
textarea{min-height:5rem}\
button{margin-top:1rem;padding:.5rem 1rem}\
pre{background:#f4f4f4;padding:1rem;overflow-x:auto;white-space:pre-wrap}\
.error{background:#fde8e8;color:#9b1c1c;padding:1rem;margin-top:1rem}";

/// Renders the page. The API key is never echoed back into the form.
pub fn render_page(inputs: &UserInputs, outcome: Outcome<'_>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Prompt Enhancer App</title>\n");
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str("<h1>🧠 Prompt Enhancer App</h1>\n");
    html.push_str("<p>Improve your prompt before sending it to GPT</p>\n");

    html.push_str("<form method=\"post\" action=\"/\">\n");
    html.push_str(
        "<label for=\"api_key\">Enter your OpenAI API Key</label>\n\
         <input id=\"api_key\" name=\"api_key\" type=\"password\" autocomplete=\"off\" \
         title=\"Your key is used only for this request\">\n",
    );
    push_textarea(
        &mut html,
        "role",
        "Role",
        "e.g. You are an experienced Python developer",
        &inputs.role,
    );
    push_textarea(
        &mut html,
        "context",
        "Context",
        "e.g. I am a beginner learning AI for coding",
        &inputs.context,
    );
    push_textarea(
        &mut html,
        "task",
        "Task",
        "e.g. Help me build a web app",
        &inputs.task,
    );
    html.push_str("<button type=\"submit\">Enhance Prompt</button>\n</form>\n");

    match outcome {
        Outcome::Blank => {}
        Outcome::Failed(err) => {
            html.push_str(&format!(
                "<div class=\"error\">{}</div>\n",
                escape_html(&err.to_string())
            ));
        }
        Outcome::Rendered(output) => {
            push_section(&mut html, "✅ Enhanced Prompt (Plain Text)", &output.plain);
            push_section(&mut html, "📄 Enhanced Prompt (XML)", &output.xml);
            push_section(
                &mut html,
                "🧾 Enhanced Prompt (JSON)",
                &output.json.to_json_string_pretty(),
            );
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_textarea(html: &mut String, name: &str, label: &str, placeholder: &str, value: &str) {
    html.push_str(&format!(
        "<label for=\"{name}\">{label}</label>\n<textarea id=\"{name}\" name=\"{name}\" placeholder=\"{}\">{}</textarea>\n",
        escape_html(placeholder),
        escape_html(value)
    ));
}

fn push_section(html: &mut String, title: &str, body: &str) {
    html.push_str(&format!(
        "<h2>{}</h2>\n<pre><code>{}</code></pre>\n",
        title,
        escape_html(body)
    ));
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
