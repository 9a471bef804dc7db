use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::auth::{first_message_key, SendCodeRequest, SendCodeResponse};
use crate::handlers::error::{
    domain_error_response, issue_failure_response, validation_error_response,
};

use ww_core::repositories::VerificationRepository;
use ww_core::services::{IssueOutcome, MailDispatcher};
use ww_shared::errors::message_keys;
use ww_shared::validation::mask_email;
use ww_shared::ApiResponse;

use super::{request_id, AppState};

/// Handler for POST /api/v1/auth/send-code
///
/// Issues a verification code to the given email address.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "message": "Verification code sent",
///         "resend_after": 60,
///         "expires_at": "2026-03-01T09:05:00Z"
///     },
///     "timestamp": "2026-03-01T09:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `errors.emailRequired`, `errors.emailInvalid`
/// - 423 Locked: `errors.accountLocked`
/// - 429 Too Many Requests: `errors.sendTooFrequent`
/// - 503 Service Unavailable: `errors.emailSendFailed`
/// - 500 Internal Server Error: `errors.sendCodeFailed`
pub async fn send_code<R, M>(
    req: HttpRequest,
    state: web::Data<AppState<R, M>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    R: VerificationRepository + ?Sized + 'static,
    M: MailDispatcher + ?Sized + 'static,
{
    let request = request.into_inner();
    let masked = mask_email(&request.email);

    if let Err(errors) = request.validate() {
        let message_key = first_message_key(&errors);
        tracing::warn!(
            email = %masked,
            reason = %message_key,
            event = "send_code_rejected",
            "Send-code request failed validation"
        );
        return validation_error_response(&message_key);
    }

    match state.verification_service.issue(&request.email).await {
        Ok(IssueOutcome::Sent(issued)) => {
            let resend_after = issued
                .next_issue_at
                .signed_duration_since(issued.issued_at)
                .num_seconds();

            let mut response = ApiResponse::success(SendCodeResponse {
                message: "Verification code sent".to_string(),
                resend_after,
                expires_at: issued.expires_at,
            });
            if let Some(id) = request_id(&req) {
                response = response.with_request_id(id);
            }

            HttpResponse::Ok().json(response)
        }
        Ok(IssueOutcome::Failed(failure)) => issue_failure_response(failure),
        Err(error) => domain_error_response(&error, message_keys::SEND_CODE_FAILED),
    }
}
