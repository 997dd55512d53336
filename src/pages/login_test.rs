use super::*;

#[test]
fn validate_login_input_trims_username() {
    assert_eq!(validate_login_input("  prof1  ", "x"), Ok(Credentials::new("prof1", "x")));
}

#[test]
fn validate_login_input_keeps_password_verbatim() {
    let creds = validate_login_input("prof1", " pass word ").unwrap();
    assert_eq!(creds.password, " pass word ");
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("", "x"), Err("Enter both user and password."));
    assert_eq!(validate_login_input("prof1", "   "), Err("Enter both user and password."));
    assert_eq!(validate_login_input("   ", ""), Err("Enter both user and password."));
}

#[test]
fn submit_label_reflects_busy_state() {
    assert_eq!(submit_label(false), "Sign in");
    assert_eq!(submit_label(true), "Signing in...");
}
