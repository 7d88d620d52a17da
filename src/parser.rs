//! Submission block parser
//!
//! The contact form delivers a loosely structured text block:
//!
//! ```text
//! Contact Details:
//! ================
//! Name: robert
//! Surname: morsman
//! Phone Number: +316 37 01 16 14
//! ```
//!
//! Each field is looked up through a declarative label table (see
//! [`Field::line_labels`]); missing fields come back empty.

use crate::error::ParseError;
use crate::types::{Field, SubmissionFields};
use regex::Regex;
use tracing::{debug, warn};

static FIELD_PATTERNS: std::sync::LazyLock<Vec<(Field, Regex)>> = std::sync::LazyLock::new(|| {
    Field::ALL
        .iter()
        .map(|&field| {
            let labels: Vec<String> = field
                .line_labels()
                .iter()
                .map(|label| regex::escape(label))
                .collect();
            let pattern = format!(r"(?i)^(?:{}):\s*(.+)$", labels.join("|"));
            (field, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Parse a submission block into its six fields.
///
/// Never fails: a field without a matching line stays empty.
#[must_use]
pub fn parse_submission(text: &str) -> SubmissionFields {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut fields = SubmissionFields::default();

    for (field, regex) in FIELD_PATTERNS.iter() {
        let value = lines
            .iter()
            .find_map(|line| regex.captures(line))
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().trim().to_string());

        if let Some(value) = value {
            *fields.slot(*field) = value;
        }
    }

    if fields.is_empty() {
        warn!("No submission fields found in {} line(s)", lines.len());
    } else {
        debug!(
            "Parsed submission for '{} {}'",
            fields.name, fields.surname
        );
    }
    fields
}

/// Parse a submission out of a raw notification e-mail.
///
/// The plain-text part is preferred; an HTML-only message is reduced to
/// text first.
pub fn parse_submission_email(raw: &[u8]) -> Result<SubmissionFields, ParseError> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| ParseError::Structure(e.to_string()))?;
    let (text, html) = extract_body_parts(&parsed)?;

    let body = if !text.trim().is_empty() {
        text
    } else if let Some(html) = html {
        strip_html(&html)
    } else {
        String::new()
    };

    debug!("Extracted {} bytes of submission text from message", body.len());
    Ok(parse_submission(&body))
}

fn extract_body_parts(
    parsed: &mailparse::ParsedMail,
) -> Result<(String, Option<String>), ParseError> {
    let mut text = String::new();
    let mut html = None;

    if parsed.subparts.is_empty() {
        let body = parsed
            .get_body()
            .map_err(|e| ParseError::Decode(e.to_string()))?;
        if parsed.ctype.mimetype.eq_ignore_ascii_case("text/html") {
            html = Some(body);
        } else {
            text = body;
        }
    } else {
        collect_body_parts(parsed, &mut text, &mut html);
    }

    Ok((text, html))
}

fn collect_body_parts(
    parsed: &mailparse::ParsedMail,
    text: &mut String,
    html: &mut Option<String>,
) {
    for part in &parsed.subparts {
        if !part.subparts.is_empty() {
            collect_body_parts(part, text, html);
            continue;
        }

        let mimetype = part.ctype.mimetype.to_lowercase();
        let Ok(body) = part.get_body() else {
            continue;
        };

        if mimetype == "text/plain" && text.is_empty() {
            *text = body;
        } else if mimetype == "text/html" && html.is_none() {
            *html = Some(body);
        }
    }
}

/// Reduce HTML to text lines, one per block element
fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut rest = html;
    let mut skip_until: Option<&str> = None;

    while let Some(open) = rest.find('<') {
        if skip_until.is_none() {
            result.push_str(&rest[..open]);
        }
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            rest = "";
            break;
        };

        let tag = after[..close].trim().to_lowercase();
        if let Some(end_tag) = skip_until {
            if tag.starts_with(end_tag) {
                skip_until = None;
            }
        } else if tag.starts_with("script") {
            skip_until = Some("/script");
        } else if tag.starts_with("style") {
            skip_until = Some("/style");
        } else if ["br", "/p", "/div", "/li", "/tr", "/h"]
            .iter()
            .any(|t| tag.starts_with(t))
        {
            result.push('\n');
        }

        rest = &after[close + 1..];
    }
    if skip_until.is_none() {
        result.push_str(rest);
    }

    let decoded = result
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&");

    decoded
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
