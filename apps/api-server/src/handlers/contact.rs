//! Contact form.

use actix_web::{HttpResponse, web};

use thinkspeak_shared::MessageResponse;
use thinkspeak_shared::dto::ContactRequest;

use crate::middleware::error::{AppResult, validate};
use crate::observability::RequestId;

/// POST /api/contact - validated and logged, not stored.
pub async fn submit(
    request_id: RequestId,
    body: web::Json<ContactRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate(&req, "Invalid contact data")?;

    tracing::info!(
        request_id = %request_id.as_str(),
        name = %req.name,
        email = %mask_email(&req.email),
        message_len = req.message.chars().count(),
        "Contact form submitted"
    );

    Ok(HttpResponse::Ok().json(MessageResponse::new("Message sent successfully")))
}

/// Mask email for logging (privacy).
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(2).collect();
            format!("{first}***@{domain}")
        }
        None => "***".to_string(),
    }
}
