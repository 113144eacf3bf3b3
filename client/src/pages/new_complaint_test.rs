use super::*;

#[test]
fn signed_in_label_prefers_username() {
    let user = User {
        username: Some("alice".to_owned()),
        email: Some("a@x.com".to_owned()),
        ..User::default()
    };
    assert_eq!(signed_in_label(Some(&user)), "Signed in as alice");
}

#[test]
fn signed_in_label_falls_back_to_email() {
    let user = User { email: Some("a@x.com".to_owned()), ..User::default() };
    assert_eq!(signed_in_label(Some(&user)), "Signed in as a@x.com");
}

#[test]
fn signed_in_label_without_user() {
    assert_eq!(signed_in_label(None), "Not signed in");
    assert_eq!(signed_in_label(Some(&User::default())), "Not signed in");
}

#[test]
fn ref_placeholder_reports_error() {
    assert_eq!(ref_placeholder(None), "Issuing reference...");
    assert_eq!(ref_placeholder(Some("offline")), "Reference unavailable (offline)");
}
