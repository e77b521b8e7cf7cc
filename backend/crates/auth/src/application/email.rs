//! Transactional email content

use askama::Template;
use chrono::{Datelike, Utc};

use crate::domain::mailer::OutgoingEmail;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

pub const VERIFICATION_SUBJECT: &str = "Please verify your email";

#[derive(Template)]
#[template(path = "registration_welcome.html")]
struct WelcomeEmailHtml<'a> {
    customer_name: &'a str,
    verification_link: &'a str,
    current_year: i32,
}

/// Welcome message with the verification link.
pub fn verification_email(
    to: &Email,
    customer_name: &str,
    verification_link: &str,
) -> AuthResult<OutgoingEmail> {
    let html = WelcomeEmailHtml {
        customer_name,
        verification_link,
        current_year: Utc::now().year(),
    }
    .render()?;

    Ok(OutgoingEmail {
        to: to.clone(),
        subject: VERIFICATION_SUBJECT.to_string(),
        html,
    })
}
