//! Server-rendered pages

use askama::Template;
use axum::response::Html;
use chrono::{Datelike, Utc};

use crate::error::AuthResult;

#[derive(Template)]
#[template(path = "verification_completed.html")]
struct VerificationCompletedPage<'a> {
    first_name: &'a str,
    frontend_url: &'a str,
    current_year: i32,
}

pub fn verification_completed(first_name: &str, frontend_url: &str) -> AuthResult<Html<String>> {
    let page = VerificationCompletedPage {
        first_name,
        frontend_url,
        current_year: Utc::now().year(),
    };
    Ok(Html(page.render()?))
}
