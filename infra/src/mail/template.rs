//! Verification email templates

use ww_core::domain::entities::verification_record::CODE_VALIDITY_MINUTES;

/// Subject line of every verification message
pub const VERIFICATION_SUBJECT: &str = "Your WorkWrap Verification Code";

/// A rendered message ready for a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Render the verification message carrying `code` for `to`
///
/// `year` goes into the copyright footer.
pub fn verification_email(to: &str, code: &str, year: i32) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: VERIFICATION_SUBJECT.to_string(),
        html: verification_html(code, year),
        text: verification_text(code, year),
    }
}

fn verification_html(code: &str, year: i32) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{subject}</title>
</head>
<body style="margin: 0; padding: 0; background-color: #f1f5f9; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; color: #0f172a;">
  <table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%">
    <tr>
      <td align="center" style="padding: 40px 20px;">
        <table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%" style="max-width: 600px; background-color: #ffffff; border-radius: 12px;">
          <tr>
            <td style="padding: 32px 40px; text-align: center; background-color: #0ea5e9; border-radius: 12px 12px 0 0;">
              <h1 style="margin: 0; font-size: 32px; color: #ffffff;">WorkWrap</h1>
            </td>
          </tr>
          <tr>
            <td style="padding: 40px;">
              <h2 style="margin: 0 0 16px; font-size: 24px;">Verification Code</h2>
              <p style="margin: 0 0 32px; font-size: 16px; color: #475569;">Please use the following code to complete your sign-in:</p>
              <div style="text-align: center; padding: 24px; border: 2px solid #0ea5e9; border-radius: 12px; font-size: 42px; font-weight: 700; letter-spacing: 12px; color: #0ea5e9; font-family: 'Courier New', monospace;">{code}</div>
              <p style="margin: 32px 0 16px; font-size: 14px; color: #475569;"><strong>Important:</strong> This code will expire in {minutes} minutes. Do not share this code with anyone.</p>
              <p style="margin: 0; font-size: 14px; color: #64748b;">If you didn't request this code, you can safely ignore this email.</p>
            </td>
          </tr>
          <tr>
            <td style="padding: 24px 40px; background-color: #f8fafc; border-radius: 0 0 12px 12px; font-size: 12px; color: #94a3b8; text-align: center;">
              This is an automated message. Please do not reply to this email.<br>
              &copy; {year} WorkWrap. All rights reserved.
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>"#,
        subject = VERIFICATION_SUBJECT,
        code = code,
        minutes = CODE_VALIDITY_MINUTES,
        year = year,
    )
}

fn verification_text(code: &str, year: i32) -> String {
    format!(
        "WorkWrap Verification Code\n\
         \n\
         Your verification code is: {code}\n\
         \n\
         This code will expire in {minutes} minutes. Do not share this code with anyone.\n\
         \n\
         If you didn't request this code, you can safely ignore this email.\n\
         \n\
         This is an automated message. Please do not reply to this email.\n\
         \n\
         © {year} WorkWrap. All rights reserved.",
        code = code,
        minutes = CODE_VALIDITY_MINUTES,
        year = year,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_email_contents() {
        let message = verification_email("user@example.com", "482913", 2026);

        assert_eq!(message.to, "user@example.com");
        assert_eq!(message.subject, "Your WorkWrap Verification Code");

        assert!(message.html.contains("482913"));
        assert!(message.html.contains("expire in 5 minutes"));
        assert!(message.html.contains("&copy; 2026 WorkWrap"));

        assert!(message.text.contains("Your verification code is: 482913"));
        assert!(message.text.contains("expire in 5 minutes"));
        assert!(message.text.starts_with("WorkWrap Verification Code\n\nYour"));
    }
}
