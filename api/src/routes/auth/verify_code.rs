use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::auth::{first_message_key, VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::error::{
    domain_error_response, validation_error_response, verify_failure_response,
};

use ww_core::repositories::VerificationRepository;
use ww_core::services::{MailDispatcher, VerifyOutcome};
use ww_shared::errors::message_keys;
use ww_shared::validation::mask_email;
use ww_shared::ApiResponse;

use super::{request_id, AppState};

/// Handler for POST /api/v1/auth/verify-code
///
/// Checks a submitted code against the latest unexpired code issued to the
/// address. A match consumes the code.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "code": "123456"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `errors.codeInvalid`, `errors.emailInvalid`
/// - 410 Gone: `errors.codeExpired`
/// - 423 Locked: `errors.accountLocked`
/// - 429 Too Many Requests: `errors.tooManyAttempts`
/// - 500 Internal Server Error: `errors.verifyCodeFailed`
pub async fn verify_code<R, M>(
    req: HttpRequest,
    state: web::Data<AppState<R, M>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    R: VerificationRepository + ?Sized + 'static,
    M: MailDispatcher + ?Sized + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        let message_key = first_message_key(&errors);
        tracing::warn!(
            email = %mask_email(&request.email),
            reason = %message_key,
            event = "verify_code_rejected",
            "Verify-code request failed validation"
        );
        return validation_error_response(&message_key);
    }

    match state
        .verification_service
        .verify(&request.email, &request.code)
        .await
    {
        Ok(VerifyOutcome::Verified(verified)) => {
            let mut response = ApiResponse::success(VerifyCodeResponse {
                verified: true,
                email: verified.address,
            });
            if let Some(id) = request_id(&req) {
                response = response.with_request_id(id);
            }

            HttpResponse::Ok().json(response)
        }
        Ok(VerifyOutcome::Failed(failure)) => verify_failure_response(failure),
        Err(error) => domain_error_response(&error, message_keys::VERIFY_CODE_FAILED),
    }
}
