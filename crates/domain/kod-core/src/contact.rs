//! Contact form validation and composition of the outgoing message.
//! Delivery itself belongs to whatever mail transport the host provides.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use kod_config::{CONTACT_RECIPIENT, MIN_MESSAGE_CHARS, MIN_NAME_CHARS};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Locale, Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("name is required")]
    Name,
    #[error("valid email is required")]
    Email,
    #[error("message must be at least {} characters", MIN_MESSAGE_CHARS)]
    Message,
}

impl ContactError {
    pub fn message(self, locale: Locale) -> &'static str {
        match self {
            ContactError::Name => Message::NameRequired.text(locale),
            ContactError::Email => Message::EmailRequired.text(locale),
            ContactError::Message => Message::MessageTooShort.text(locale),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A submission that passed validation; fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub from: String,
    pub reply_to: String,
    pub body: String,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        )
        .expect("email pattern compiles")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.')
        && !email.contains("..")
        && !email.contains(".@")
        && email_pattern().is_match(email)
}

impl ContactSubmission {
    /// Reports every failing field, in form order.
    pub fn validate(&self) -> Result<ValidContact, Vec<ContactError>> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        let mut errors = Vec::new();
        if name.chars().count() < MIN_NAME_CHARS {
            errors.push(ContactError::Name);
        }
        if !is_valid_email(email) {
            errors.push(ContactError::Email);
        }
        if message.chars().count() < MIN_MESSAGE_CHARS {
            errors.push(ContactError::Message);
        }

        if errors.is_empty() {
            Ok(ValidContact {
                name: name.to_string(),
                email: email.to_string(),
                message: message.to_string(),
            })
        } else {
            Err(errors)
        }
    }
}

/// Header values must stay on one line.
fn header_safe(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

impl ValidContact {
    pub fn compose(
        &self,
        locale: Locale,
        referer: Option<&str>,
        sent_at: NaiveDateTime,
    ) -> OutgoingMail {
        let mut body = String::new();
        body.push_str(&format!("Name / Ad-Soyad: {}\n", self.name));
        body.push_str(&format!("Email / E-posta: {}\n\n", self.email));
        body.push_str(&format!("Message / Mesaj:\n{}\n\n", self.message));
        body.push_str("---\n");
        body.push_str(&format!("Sent from: {}\n", referer.unwrap_or("Unknown")));
        body.push_str(&format!("Date: {}\n", sent_at.format("%Y-%m-%d %H:%M:%S")));

        let email = header_safe(&self.email);
        OutgoingMail {
            to: CONTACT_RECIPIENT.to_string(),
            subject: Message::MailSubject.text(locale).to_string(),
            from: format!("{} <{}>", header_safe(&self.name), email),
            reply_to: email,
            body,
        }
    }
}
