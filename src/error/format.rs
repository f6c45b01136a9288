use crate::error::{DriverkitError, ErrorContext};

pub fn format_error_chain(error: &DriverkitError) -> String {
    let context = ErrorContext::new(error);
    context.to_string()
}
