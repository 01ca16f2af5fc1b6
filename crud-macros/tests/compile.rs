#[test]
fn entity_macro_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/entity_basic.rs");
    t.pass("tests/ui/entity_existing_id.rs");
    t.pass("tests/ui/entity_validate.rs");
    t.pass("tests/ui/entity_custom_debug.rs");
}
