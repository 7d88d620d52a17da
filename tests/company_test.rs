use madaq_signature::*;

#[test]
fn test_company_email_basic() {
    assert_eq!(generate_company_email("Robert", "Morsman"), "r.morsman@madaq.com");
}

#[test]
fn test_company_email_lowercases() {
    assert_eq!(generate_company_email("ROBERT", "MORSMAN"), "r.morsman@madaq.com");
}

#[test]
fn test_company_email_trims() {
    assert_eq!(generate_company_email("  robert ", " morsman "), "r.morsman@madaq.com");
}

#[test]
fn test_company_email_compound_surname() {
    assert_eq!(
        generate_company_email("Anne", "van der Berg"),
        "a.vanderberg@madaq.com"
    );
    assert_eq!(
        generate_company_email("Jan", "O'Brien-Smith"),
        "j.obriensmith@madaq.com"
    );
}

#[test]
fn test_company_email_keeps_accented_letters() {
    assert_eq!(generate_company_email("Émile", "Özdemir"), "é.özdemir@madaq.com");
}

#[test]
fn test_company_email_empty_parts() {
    assert_eq!(generate_company_email("", "Morsman"), "");
    assert_eq!(generate_company_email("Robert", "   "), "");
    assert_eq!(generate_company_email("", ""), "");
}

#[test]
fn test_company_email_uses_company_domain() {
    let email = generate_company_email("Robert", "Morsman");
    assert!(email.ends_with(&format!("@{COMPANY_DOMAIN}")));
}
