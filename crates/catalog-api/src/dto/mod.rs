//! Request and response bodies.

pub mod request;
pub mod response;

use validator::Validate;

use catalog_core::error::AppError;

/// Runs `validator` rules on a request body.
///
/// Field messages are joined into a single validation error.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        AppError::validation(messages.join("; "))
    })
}
