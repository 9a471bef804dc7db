mod create_dispatcher_tests;
#[cfg(feature = "resend-mail")]
mod resend_tests;
