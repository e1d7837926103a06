//! Contact form validation and the two notification emails it triggers.

use thiserror::Error;

use super::shipment::is_valid_email;

const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 255;
const PHONE_MAX: usize = 20;
const COMPANY_MAX: usize = 100;
const MESSAGE_MAX: usize = 1000;

pub const SENDER_NAME: &str = "SNLH Logistics";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ContactValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be less than {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("invalid email address")]
    InvalidEmail,
}

/// Raw contact form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
}

/// A validated contact request.
#[derive(Clone, Debug, PartialEq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<ContactRequest, ContactValidationError> {
        let name = bounded(&self.name, "name", NAME_MAX)?;
        let email = bounded(&self.email, "email", EMAIL_MAX)?;
        let phone = bounded(&self.phone, "phone", PHONE_MAX)?;
        let company = bounded(&self.company, "company name", COMPANY_MAX)?;
        let message = bounded(&self.message, "message", MESSAGE_MAX)?;

        if name.is_empty() {
            return Err(ContactValidationError::Required("name"));
        }
        if !is_valid_email(&email) {
            return Err(ContactValidationError::InvalidEmail);
        }
        if message.is_empty() {
            return Err(ContactValidationError::Required("message"));
        }

        Ok(ContactRequest {
            name,
            email,
            phone: (!phone.is_empty()).then_some(phone),
            company: (!company.is_empty()).then_some(company),
            message,
        })
    }
}

fn bounded(raw: &str, field: &'static str, max: usize) -> Result<String, ContactValidationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() > max {
        return Err(ContactValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

/// A rendered email ready for dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Confirmation sent back to the person who filled in the form.
pub fn customer_confirmation(request: &ContactRequest, from_address: &str) -> OutgoingEmail {
    let name = escape_html(&request.name);
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
<h1 style="color: #1e3a8a;">Thank you for contacting {SENDER_NAME}, {name}!</h1>
<p style="font-size: 16px; line-height: 1.6;">We have received your message and will get back to you as soon as possible.</p>
<div style="background-color: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0;">
<h3 style="margin-top: 0;">Your Message:</h3>
{details}</div>
<p style="font-size: 14px; color: #6b7280;">Best regards,<br>The {SENDER_NAME} Team</p>
</div>"#,
        details = detail_block(request, false),
    );

    OutgoingEmail {
        from: format!("{SENDER_NAME} <{from_address}>"),
        to: vec![request.email.clone()],
        subject: "We received your message!".to_string(),
        html,
    }
}

/// Notification for the office inbox.
pub fn admin_notification(
    request: &ContactRequest,
    from_address: &str,
    admin_email: &str,
) -> OutgoingEmail {
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
<h1 style="color: #1e3a8a;">New Contact Form Submission</h1>
<div style="background-color: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0;">
{details}</div>
</div>"#,
        details = detail_block(request, true),
    );

    OutgoingEmail {
        from: format!("SNLH Contact Form <{from_address}>"),
        to: vec![admin_email.to_string()],
        subject: format!("New Contact Form Submission from {}", request.name),
        html,
    }
}

fn detail_block(request: &ContactRequest, preserve_whitespace: bool) -> String {
    let row = |label: &str, value: &str| {
        format!(
            "<p style=\"margin: 10px 0;\"><strong>{label}:</strong> {}</p>\n",
            escape_html(value)
        )
    };
    let mut out = String::new();
    out.push_str(&row("Name", &request.name));
    out.push_str(&row("Email", &request.email));
    if let Some(phone) = &request.phone {
        out.push_str(&row("Phone", phone));
    }
    if let Some(company) = &request.company {
        out.push_str(&row("Company", company));
    }
    out.push_str("<p style=\"margin: 10px 0;\"><strong>Message:</strong></p>\n");
    let style = if preserve_whitespace {
        "margin: 10px 0; white-space: pre-wrap;"
    } else {
        "margin: 10px 0;"
    };
    out.push_str(&format!(
        "<p style=\"{style}\">{}</p>\n",
        escape_html(&request.message)
    ));
    out
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
