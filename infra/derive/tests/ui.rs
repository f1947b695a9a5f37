#[test]
fn persona_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/persona_error_pass.rs");
}
