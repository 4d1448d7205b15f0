//! TwiML rendering of voice-response programs

use receptionist::{VoiceInstruction, VoiceResponse};

use super::escape_markup;

pub const TWIML_CONTENT_TYPE: &str = "text/xml";

/// Render a voice-response program as a TwiML document
pub fn render_twiml(response: &VoiceResponse) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#);

    for instruction in response.instructions() {
        match instruction {
            VoiceInstruction::Say {
                text,
                voice,
                language,
            } => {
                xml.push_str("<Say");
                if let Some(voice) = voice {
                    push_attr(&mut xml, "voice", voice);
                }
                if let Some(language) = language {
                    push_attr(&mut xml, "language", language);
                }
                xml.push('>');
                xml.push_str(&escape_markup(text));
                xml.push_str("</Say>");
            }
            VoiceInstruction::Gather(gather) => {
                xml.push_str("<Gather");
                push_attr(&mut xml, "input", "speech");
                push_attr(&mut xml, "action", &gather.action);
                push_attr(&mut xml, "method", &gather.method);
                push_attr(&mut xml, "timeout", &gather.timeout_secs.to_string());
                push_attr(&mut xml, "speechTimeout", &gather.speech_timeout);
                push_attr(&mut xml, "language", &gather.language);
                xml.push_str("/>");
            }
            VoiceInstruction::Hangup => xml.push_str("<Hangup/>"),
        }
    }

    xml.push_str("</Response>");
    xml
}

fn push_attr(xml: &mut String, name: &str, value: &str) {
    xml.push(' ');
    xml.push_str(name);
    xml.push_str("=\"");
    xml.push_str(&escape_markup(value));
    xml.push('"');
}
