//! Sends contact form emails through the Resend HTTP API.

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::contact::{admin_notification, customer_confirmation};
use crate::domain::{ContactRequest, OutgoingEmail};
use crate::util::version::user_agent;

const DEFAULT_BASE_URL: &str = "https://api.resend.com/";
const API_KEY_ENV: &str = "RESEND_API_KEY";
const FROM_ADDRESS_ENV: &str = "RESEND_FROM_ADDRESS";
const DEFAULT_FROM_ADDRESS: &str = "onboarding@resend.dev";

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("email delivery is not configured (set RESEND_API_KEY)")]
    NotConfigured,
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("email provider rejected the message: {0}")]
    Api(String),
}

/// Provider ids of the two emails sent for one contact request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactReceipt {
    pub customer_email_id: Option<String>,
    pub admin_email_id: Option<String>,
}

#[derive(Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct ContactMailer {
    http: Client,
    base_url: Url,
    api_key: String,
    from_address: String,
}

impl ContactMailer {
    /// Reads the API key from the environment.
    pub fn from_env() -> Result<Self, MailerError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(MailerError::NotConfigured)?;
        let from_address =
            std::env::var(FROM_ADDRESS_ENV).unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string());
        Self::new(DEFAULT_BASE_URL, api_key, from_address)
    }

    pub fn new(
        base: &str,
        api_key: impl Into<String>,
        from_address: impl Into<String>,
    ) -> Result<Self, MailerError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(user_agent()).build()?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            from_address: from_address.into(),
        })
    }

    /// Sends the customer confirmation, then the admin notification.
    pub async fn send_contact(
        &self,
        request: &ContactRequest,
        admin_email: &str,
    ) -> Result<ContactReceipt, MailerError> {
        tracing::info!(name = %request.name, email = %request.email, "sending contact email");

        let customer = customer_confirmation(request, &self.from_address);
        let customer_email_id = self.send(&customer).await?;

        let admin = admin_notification(request, &self.from_address, admin_email);
        let admin_email_id = self.send(&admin).await?;

        tracing::info!(?customer_email_id, ?admin_email_id, "contact emails sent");
        Ok(ContactReceipt {
            customer_email_id,
            admin_email_id,
        })
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<Option<String>, MailerError> {
        let url = self.base_url.join("emails")?;
        let body = SendEmailBody {
            from: &email.from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| status.to_string());
            tracing::warn!(%status, %message, "email provider returned an error");
            return Err(MailerError::Api(message));
        }

        Ok(response.json::<SendEmailResponse>().await?.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// One request as seen by the local provider stand-in.
    struct Received {
        head: String,
        body: Value,
    }

    type Inbox = Arc<Mutex<Vec<Received>>>;

    /// Answers every request with `status` and `reply`, recording what was posted.
    async fn provider_stub(status: &'static str, reply: &'static str) -> (String, Inbox) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/", listener.local_addr().unwrap());
        let inbox: Inbox = Arc::default();
        let sink = Arc::clone(&inbox);
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let received = read_request(&mut socket).await;
                sink.lock().unwrap().push(received);
                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{reply}",
                    reply.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });
        (base, inbox)
    }

    async fn read_request(socket: &mut TcpStream) -> Received {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let read = socket.read(&mut chunk).await.unwrap();
            assert!(read > 0, "connection closed before the request head");
            buf.extend_from_slice(&chunk[..read]);
            if let Some(pos) = buf.windows(4).position(|window| window == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
        let length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                (name.trim() == "content-length").then(|| value.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        while buf.len() < header_end + length {
            let read = socket.read(&mut chunk).await.unwrap();
            assert!(read > 0, "connection closed before the request body");
            buf.extend_from_slice(&chunk[..read]);
        }
        let body = serde_json::from_slice(&buf[header_end..header_end + length]).unwrap();
        Received { head, body }
    }

    fn request() -> ContactRequest {
        ContactRequest {
            name: "Sita Sharma".into(),
            email: "sita@example.com".into(),
            phone: None,
            company: Some("Everest Traders".into()),
            message: "Need a quote for 200 kg of garments.".into(),
        }
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            ContactMailer::new("not a url", "key", DEFAULT_FROM_ADDRESS),
            Err(MailerError::InvalidUrl(_))
        ));
    }

    #[test]
    fn emails_endpoint_is_relative_to_base() {
        let mailer = ContactMailer::new("http://localhost:8025/api/", "key", "a@b.co").unwrap();
        assert_eq!(
            mailer.base_url.join("emails").unwrap().as_str(),
            "http://localhost:8025/api/emails"
        );
    }

    #[test]
    fn missing_or_blank_key_is_not_configured() {
        std::env::remove_var(API_KEY_ENV);
        assert!(matches!(
            ContactMailer::from_env(),
            Err(MailerError::NotConfigured)
        ));

        std::env::set_var(API_KEY_ENV, "   ");
        assert!(matches!(
            ContactMailer::from_env(),
            Err(MailerError::NotConfigured)
        ));
        std::env::remove_var(API_KEY_ENV);
    }

    #[tokio::test]
    async fn posts_customer_then_admin_email() {
        let (base, inbox) = provider_stub("200 OK", r#"{"id":"email-1"}"#).await;
        let mailer = ContactMailer::new(&base, "test-key", "desk@example.com").unwrap();

        let receipt = mailer.send_contact(&request(), "office@snlh.com").await.unwrap();
        assert_eq!(
            receipt,
            ContactReceipt {
                customer_email_id: Some("email-1".into()),
                admin_email_id: Some("email-1".into()),
            }
        );

        let received = inbox.lock().unwrap();
        assert_eq!(received.len(), 2);
        for message in received.iter() {
            assert!(message.head.starts_with("post /emails http/1.1"));
            assert!(message.head.contains("authorization: bearer test-key"));
        }
        assert_eq!(received[0].body["to"], serde_json::json!(["sita@example.com"]));
        assert_eq!(received[0].body["subject"], "We received your message!");
        assert_eq!(received[1].body["to"], serde_json::json!(["office@snlh.com"]));
        assert_eq!(
            received[1].body["from"],
            "SNLH Contact Form <desk@example.com>"
        );
    }

    #[tokio::test]
    async fn provider_rejection_surfaces_its_message() {
        let (base, inbox) = provider_stub(
            "422 Unprocessable Entity",
            r#"{"message":"The from address is not verified"}"#,
        )
        .await;
        let mailer = ContactMailer::new(&base, "test-key", "desk@example.com").unwrap();

        let err = mailer
            .send_contact(&request(), "office@snlh.com")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MailerError::Api(ref message) if message == "The from address is not verified"
        ));
        // The admin email is not attempted once the confirmation fails.
        assert_eq!(inbox.lock().unwrap().len(), 1);
    }
}
