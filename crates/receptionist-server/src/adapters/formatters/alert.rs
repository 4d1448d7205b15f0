//! Alert bodies for important-call notifications

use receptionist::NotificationPayload;

use super::escape_markup;

pub fn format_email_subject(payload: &NotificationPayload) -> String {
    format!("🔔 Important Call from {}", payload.caller)
}

/// HTML email body
pub fn format_email_html(payload: &NotificationPayload, assistant_name: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #667eea;">🔔 Important Call Alert from {assistant}</h2>
  <div style="background: #f8f9fa; padding: 20px; border-radius: 10px; margin: 20px 0;">
    <p><strong>Caller:</strong> {caller}</p>
    <p><strong>Phone Number:</strong> {number}</p>
    <p><strong>Topic:</strong> {topic}</p>
    <p><strong>Time:</strong> {time}</p>
  </div>
  <div style="background: #fff3cd; padding: 15px; border-left: 4px solid #ffc107; margin: 20px 0;">
    <h3 style="margin-top: 0;">Summary:</h3>
    <p>{summary}</p>
  </div>
  <p style="color: #666; font-size: 12px; margin-top: 30px;">This notification was sent by {assistant} AI Assistant</p>
</div>"#,
        assistant = escape_markup(assistant_name),
        caller = escape_markup(&payload.caller),
        number = escape_markup(&payload.caller_number),
        topic = escape_markup(&payload.topic),
        time = payload.formatted_time(),
        summary = escape_markup(&payload.summary),
    )
}

/// WhatsApp text body (WhatsApp markdown)
pub fn format_whatsapp_text(payload: &NotificationPayload, assistant_name: &str) -> String {
    format!(
        "🔔 *Important Call Alert*\n\n\
         *Caller:* {}\n\
         *Phone:* {}\n\
         *Topic:* {}\n\
         *Time:* {}\n\n\
         *Summary:*\n{}\n\n\
         _Sent by {} AI Assistant_",
        payload.caller,
        payload.caller_number,
        payload.topic,
        payload.formatted_time(),
        payload.summary,
        assistant_name
    )
}
