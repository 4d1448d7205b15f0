//! Output Formatters
//!
//! Transform domain values into wire formats: TwiML for the telephony
//! layer, and alert bodies for each notification channel.

mod alert;
mod twiml;

pub use alert::{format_email_html, format_email_subject, format_whatsapp_text};
pub use twiml::{render_twiml, TWIML_CONTENT_TYPE};

/// Escape text for inclusion in XML/HTML content or attribute values
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
