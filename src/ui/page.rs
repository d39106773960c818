//! HTML rendering shared by the direct and proxy UIs.
//!
//! Both variants render the same page: a multi-select over the symptom
//! vocabulary and one outcome panel (result, warning or error).

use crate::prediction::{PredictionResult, SymptomSet};

pub const EMPTY_SELECTION_WARNING: &str = "Please select at least one symptom.";

/// What the page shows under the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Prediction(PredictionResult),
    Warning(String),
    Error(String),
}

pub struct PageView<'a> {
    pub heading: &'a str,
    pub symptoms: &'a [String],
    pub selected: &'a SymptomSet,
    pub outcome: Option<&'a Outcome>,
}

/// Collect the `symptoms` values of a url-encoded form submission.
pub fn selected_symptoms(fields: Vec<(String, String)>) -> SymptomSet {
    fields
        .into_iter()
        .filter(|(key, _)| key == "symptoms")
        .map(|(_, value)| value)
        .collect()
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn render(view: &PageView<'_>) -> String {
    let mut options = String::new();
    for name in view.symptoms {
        let selected = if view.selected.contains(name) {
            " selected"
        } else {
            ""
        };
        let name = escape_html(name);
        options.push_str(&format!("      <option value=\"{name}\"{selected}>{name}</option>\n"));
    }

    let outcome = view.outcome.map(render_outcome).unwrap_or_default();

    format!(
        "{head}\
<body>\n\
  <main>\n\
    <h1>{heading}</h1>\n\
    <p class=\"lead\">Select symptoms and click <strong>Predict Disease</strong> to get a diagnosis, description and precautions.</p>\n\
    <form method=\"post\" action=\"/\">\n\
      <label for=\"symptoms\">Select your symptoms</label>\n\
      <select id=\"symptoms\" name=\"symptoms\" multiple size=\"14\">\n\
{options}\
      </select>\n\
      <button type=\"submit\">Predict Disease</button>\n\
    </form>\n\
{outcome}\
  </main>\n\
</body>\n\
</html>\n",
        head = PAGE_HEAD,
        heading = escape_html(view.heading),
    )
}

fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Warning(message) => format!(
            "    <div class=\"panel warning\">{}</div>\n",
            escape_html(message)
        ),
        Outcome::Error(message) => format!(
            "    <div class=\"panel error\">{}</div>\n",
            escape_html(message)
        ),
        Outcome::Prediction(result) => {
            let mut html = format!(
                "    <section class=\"result\">\n\
      <div class=\"panel success\">Predicted Disease: <strong>{}</strong></div>\n\
      <p>Confidence: <strong>{}%</strong></p>\n\
      <h2>Description</h2>\n\
      <div class=\"panel info\">{}</div>\n",
                escape_html(&result.disease_name),
                result.confidence_percent(),
                escape_html(&result.description),
            );
            if !result.home_care.is_empty() {
                html.push_str("      <h2>Home Care Precautions</h2>\n      <ul>\n");
                for tip in &result.home_care {
                    html.push_str(&format!("        <li>{}</li>\n", escape_html(tip)));
                }
                html.push_str("      </ul>\n");
            }
            html.push_str("    </section>\n");
            html
        }
    }
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Disease Predictor</title>
  <style>
    * { box-sizing: border-box; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
      background: #fafaf9; color: #1c1917; margin: 0; padding: 32px 24px;
    }
    main { max-width: 760px; margin: 0 auto; }
    h1 { font-size: 26px; margin-bottom: 8px; }
    h2 { font-size: 18px; margin: 20px 0 8px; }
    .lead { color: #78716c; font-size: 14px; margin-bottom: 20px; }
    label { display: block; font-weight: 600; margin-bottom: 8px; }
    select {
      width: 100%; padding: 8px; border: 1px solid #d6d3d1; border-radius: 8px;
      font-size: 14px; background: white;
    }
    button {
      margin-top: 16px; padding: 12px 20px; border: none; border-radius: 10px;
      background: #4a7c59; color: white; font-size: 16px; cursor: pointer;
    }
    .panel { margin-top: 20px; padding: 14px 16px; border-radius: 10px; }
    .success { background: #dcfce7; color: #14532d; }
    .info { background: #e0f2fe; color: #0c4a6e; }
    .warning { background: #fef9c3; color: #713f12; }
    .error { background: #fee2e2; color: #7f1d1d; }
  </style>
</head>
"#;
