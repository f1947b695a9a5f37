use std::borrow::Cow;

/// Errors raised by the people slice.
#[persona_derive::persona_error]
pub enum PeopleError {
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal people error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
