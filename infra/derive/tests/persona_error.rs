use persona_derive::persona_error;
use std::borrow::Cow;

#[persona_error]
pub enum ProbeError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Rejected{}: {reason}", format_context(.context))]
    Rejected { reason: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<i64, ProbeError> {
    Ok(raw.parse::<i64>()?)
}

#[test]
fn question_mark_converts_source_errors() {
    let err = parse("abc").expect_err("not a number");
    assert!(matches!(err, ProbeError::Parse { context: None, .. }));
    assert!(err.to_string().starts_with("Parse error: "));
}

#[test]
fn context_on_source_result_wraps_and_annotates() {
    let err = "abc".parse::<i64>().context("reading age").expect_err("not a number");
    assert!(matches!(&err, ProbeError::Parse { context: Some(c), .. } if c == "reading age"));
    assert!(err.to_string().starts_with("Parse error (reading age): "));
}

#[test]
fn context_on_own_result_replaces_context() {
    let result: Result<(), ProbeError> =
        Err(ProbeError::Rejected { reason: "too old".into(), context: None });
    let err = result.context("age check").expect_err("rejected");
    assert_eq!(err.to_string(), "Rejected (age check): too old");
}

#[test]
fn strings_convert_into_internal() {
    let from_static: ProbeError = "boom".into();
    let from_owned: ProbeError = String::from("bang").into();
    assert_eq!(from_static.to_string(), "Internal error: boom");
    assert_eq!(from_owned.to_string(), "Internal error: bang");
}
