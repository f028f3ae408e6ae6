//! Server-rendered form page

use crate::evaluate::Outcome;
use heartcheck_core::{Domain, Feature, FeatureInputs, FeatureKind, FeatureValue};
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f7f7f9; color: #222; }
.layout { display: flex; min-height: 100vh; }
aside { width: 320px; padding: 1.5rem; background: #eef0f4; }
main { flex: 1; padding: 2rem 3rem; }
label { display: block; margin-top: 0.8rem; font-weight: 600; }
small { display: block; color: #666; font-weight: normal; }
input, select { width: 100%; padding: 0.3rem; margin-top: 0.2rem; }
button { margin-top: 1.2rem; padding: 0.5rem 1rem; }
.metric { display: inline-block; margin-right: 3rem; }
.metric .value { font-size: 2.2rem; }
.warning { background: #fff4d6; border: 1px solid #e6c35c; padding: 1rem; }
.error { background: #fde2e2; border: 1px solid #e07a7a; padding: 1rem; }
table { border-collapse: collapse; margin-top: 0.5rem; }
th, td { border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: right; }
"#;

/// Window title and page heading
#[derive(Debug, Clone, Copy)]
pub struct Titles<'a> {
    pub window: &'a str,
    pub heading: &'a str,
}

/// Render the whole page for one cycle
pub fn render(titles: Titles<'_>, inputs: &FeatureInputs, outcome: &Outcome) -> String {
    let mut html = String::with_capacity(8 * 1024);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<div class=\"layout\">\n",
        title = escape(titles.window),
    );

    render_form(&mut html, inputs);

    let _ = write!(
        html,
        "<main>\n<h1>{}</h1>\n<p>Enter patient information to get a <strong>real-time prediction</strong> of heart disease risk.</p>\n",
        escape(titles.heading)
    );
    render_outcome(&mut html, outcome);
    html.push_str("</main>\n</div>\n</body>\n</html>\n");
    html
}

/// Render a page for a cycle that failed inside the classifier
pub fn render_failure(titles: Titles<'_>, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<title>{window}</title>\n\
         <style>{STYLE}</style>\n</head>\n<body>\n<main>\n<h1>{heading}</h1>\n\
         <div class=\"error\">Prediction failed: {message}</div>\n</main>\n</body>\n</html>\n",
        window = escape(titles.window),
        heading = escape(titles.heading),
        message = escape(message),
    )
}

fn render_form(html: &mut String, inputs: &FeatureInputs) {
    html.push_str("<aside>\n<h2>Patient Inputs</h2>\n<form method=\"get\" action=\"/\">\n");

    for kind in [FeatureKind::Numeric, FeatureKind::Categorical] {
        for feature in Feature::ALL.iter().filter(|f| f.kind() == kind) {
            let value = inputs.get(*feature).unwrap_or_else(|| feature.default_value());
            let _ = write!(
                html,
                "<label for=\"{name}\">{label}<small>{help}</small></label>\n",
                name = feature.name(),
                label = escape(feature.label()),
                help = escape(feature.help()),
            );
            match feature.domain() {
                Domain::Range { min, max, step } => {
                    let _ = write!(
                        html,
                        "<input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\">\n",
                        name = feature.name(),
                        value = value.as_f64(),
                    );
                }
                Domain::Options { values } => {
                    let _ = write!(html, "<select id=\"{name}\" name=\"{name}\">\n", name = feature.name());
                    // Keep a rejected code visible next to the error instead of
                    // letting the browser fall back to the first option
                    if let FeatureValue::Categorical(code) = value {
                        if !values.contains(&code) {
                            let _ = writeln!(
                                html,
                                "<option value=\"{code}\" selected>{code} (not allowed)</option>"
                            );
                        }
                    }
                    for option in values {
                        let selected = if value == FeatureValue::Categorical(*option) {
                            " selected"
                        } else {
                            ""
                        };
                        let _ = writeln!(html, "<option value=\"{option}\"{selected}>{option}</option>");
                    }
                    html.push_str("</select>\n");
                }
            }
        }
    }

    html.push_str("<button type=\"submit\">Predict</button>\n</form>\n</aside>\n");
}

fn render_outcome(html: &mut String, outcome: &Outcome) {
    match outcome {
        Outcome::ModelUnavailable(message) => {
            let _ = writeln!(html, "<div class=\"warning\">{}</div>", escape(message));
        }
        Outcome::InvalidInput(message) => {
            let _ = writeln!(html, "<div class=\"error\">Invalid input: {}</div>", escape(message));
        }
        Outcome::Predicted(prediction) => {
            html.push_str("<h3>Real-time Prediction</h3>\n");
            let _ = writeln!(
                html,
                "<div class=\"metric\"><div>Prediction (1 = disease)</div><div class=\"value\" id=\"label\">{}</div></div>",
                prediction.label
            );
            if let Some(probability) = prediction.probability_display() {
                let _ = writeln!(
                    html,
                    "<div class=\"metric\"><div>Probability</div><div class=\"value\" id=\"probability\">{}</div></div>",
                    probability
                );
            }

            html.push_str("<hr>\n<h4>Model Inputs</h4>\n<table id=\"record\">\n<tr>");
            for (feature, _) in prediction.record.iter() {
                let _ = write!(html, "<th>{}</th>", feature.name());
            }
            html.push_str("</tr>\n<tr>");
            for (_, value) in prediction.record.iter() {
                let _ = write!(html, "<td>{}</td>", value);
            }
            html.push_str("</tr>\n</table>\n");
        }
    }
}

/// Minimal HTML escaping for text and attribute content
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
