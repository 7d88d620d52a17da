use chrono::{Local, TimeZone};
use lettre::Message;
use madaq_signature::*;
use mailparse::MailHeaderMap;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

const CONFIG: &str = r#"
[smtp]
server = "smtp.example.com"
port = 587
sender_email = "forms@madaq.com"
sender_password = "hunter2"
recipient_email = "r.morsman@madaq.com"
"#;

/// Replays scripted outcomes, succeeding once the script runs out
#[derive(Default)]
struct MockTransport {
    script: RefCell<VecDeque<TransportError>>,
    calls: Cell<u32>,
}

impl MockTransport {
    fn failing(errors: Vec<TransportError>) -> Self {
        Self {
            script: RefCell::new(errors.into()),
            calls: Cell::new(0),
        }
    }
}

impl MailTransport for MockTransport {
    fn send(&self, _message: &Message) -> std::result::Result<(), TransportError> {
        self.calls.set(self.calls.get() + 1);
        self.script.borrow_mut().pop_front().map_or(Ok(()), Err)
    }
}

/// Always fails with the same error
struct BrokenTransport(TransportError, Cell<u32>);

impl MailTransport for BrokenTransport {
    fn send(&self, _message: &Message) -> std::result::Result<(), TransportError> {
        self.1.set(self.1.get() + 1);
        Err(self.0.clone())
    }
}

#[derive(Default)]
struct RecordingObserver {
    events: RefCell<Vec<String>>,
}

impl DeliveryObserver for RecordingObserver {
    fn attempt_started(&self, attempt: u32, max_attempts: u32) {
        self.events
            .borrow_mut()
            .push(format!("start {attempt}/{max_attempts}"));
    }

    fn retrying(&self, attempt: u32, _error: &TransportError) {
        self.events.borrow_mut().push(format!("retry {attempt}"));
    }

    fn delivered(&self, attempts: u32) {
        self.events.borrow_mut().push(format!("delivered {attempts}"));
    }

    fn failed(&self, _error: &DeliveryError) {
        self.events.borrow_mut().push("failed".to_string());
    }
}

fn settings() -> SmtpSettings {
    SmtpSettings::from_config(&AppConfig::from_toml_str(CONFIG).unwrap()).unwrap()
}

fn fields() -> SubmissionFields {
    SubmissionFields {
        name: "Robert".into(),
        surname: "Morsman".into(),
        email: "robert@example.com".into(),
        phone: "06 37011614".into(),
        job_title: "Baasje".into(),
        favourite_bonbon: "Yuzu caramel".into(),
    }
}

fn smtp_error() -> TransportError {
    TransportError::Smtp("451 temporary local problem".into())
}

// --- retry loop ---

#[test]
fn test_first_attempt_succeeds() {
    let delivery = SmtpDelivery::with_transport(settings(), MockTransport::default());
    let observer = RecordingObserver::default();
    let signature = SignatureGenerator::default().generate(&fields());

    delivery
        .send_signature(&fields(), &signature, &observer)
        .unwrap();

    assert_eq!(delivery.transport().calls.get(), 1);
    assert_eq!(*observer.events.borrow(), vec!["start 1/3", "delivered 1"]);
}

#[test]
fn test_smtp_errors_are_retried_until_success() {
    let transport = MockTransport::failing(vec![smtp_error(), smtp_error()]);
    let delivery = SmtpDelivery::with_transport(settings(), transport);
    let observer = RecordingObserver::default();
    let signature = SignatureGenerator::default().generate(&fields());

    delivery
        .send_signature(&fields(), &signature, &observer)
        .unwrap();

    assert_eq!(delivery.transport().calls.get(), 3);
    assert_eq!(
        *observer.events.borrow(),
        vec![
            "start 1/3",
            "retry 1",
            "start 2/3",
            "retry 2",
            "start 3/3",
            "delivered 3"
        ]
    );
}

#[test]
fn test_smtp_errors_exhaust_attempts() {
    let transport = BrokenTransport(smtp_error(), Cell::new(0));
    let delivery = SmtpDelivery::with_transport(settings(), transport);
    let observer = RecordingObserver::default();
    let signature = SignatureGenerator::default().generate(&fields());

    let err = delivery
        .send_signature(&fields(), &signature, &observer)
        .unwrap_err();

    assert!(matches!(
        err,
        DeliveryError::RetriesExhausted { attempts: 3, ref last } if last.contains("451")
    ));
    assert_eq!(delivery.transport().1.get(), 3);
    assert_eq!(observer.events.borrow().last().unwrap(), "failed");
}

#[test]
fn test_authentication_error_is_not_retried() {
    let transport = BrokenTransport(
        TransportError::Authentication("535 5.7.8 bad credentials".into()),
        Cell::new(0),
    );
    let delivery = SmtpDelivery::with_transport(settings(), transport);
    let signature = SignatureGenerator::default().generate(&fields());

    let err = delivery
        .send_signature(&fields(), &signature, &NoopObserver)
        .unwrap_err();

    assert!(matches!(err, DeliveryError::Authentication(_)));
    assert_eq!(delivery.transport().1.get(), 1);
}

#[test]
fn test_unexpected_error_is_not_retried() {
    let transport = BrokenTransport(
        TransportError::Unexpected("connection refused".into()),
        Cell::new(0),
    );
    let delivery = SmtpDelivery::with_transport(settings(), transport);
    let observer = RecordingObserver::default();
    let signature = SignatureGenerator::default().generate(&fields());

    let err = delivery
        .send_signature(&fields(), &signature, &observer)
        .unwrap_err();

    assert!(matches!(err, DeliveryError::Unexpected(ref msg) if msg == "connection refused"));
    assert_eq!(delivery.transport().1.get(), 1);
    assert_eq!(*observer.events.borrow(), vec!["start 1/3", "failed"]);
}

#[test]
fn test_single_attempt_policy() {
    let config = format!("{CONFIG}max_attempts = 1\n");
    let settings = SmtpSettings::from_config(&AppConfig::from_toml_str(&config).unwrap()).unwrap();
    let delivery =
        SmtpDelivery::with_transport(settings, BrokenTransport(smtp_error(), Cell::new(0)));
    let signature = SignatureGenerator::default().generate(&fields());

    let err = delivery
        .send_signature(&fields(), &signature, &NoopObserver)
        .unwrap_err();

    assert!(matches!(err, DeliveryError::RetriesExhausted { attempts: 1, .. }));
    assert_eq!(delivery.policy(), RetryPolicy::new(1));
}

// --- retry policy ---

#[test]
fn test_retry_policy_decisions() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);

    assert!(matches!(policy.decide(1, &smtp_error()), RetryDecision::Retry));
    assert!(matches!(policy.decide(2, &smtp_error()), RetryDecision::Retry));
    assert!(matches!(
        policy.decide(3, &smtp_error()),
        RetryDecision::GiveUp(DeliveryError::RetriesExhausted { attempts: 3, .. })
    ));
    assert!(matches!(
        policy.decide(1, &TransportError::Authentication("535".into())),
        RetryDecision::GiveUp(DeliveryError::Authentication(_))
    ));
    assert!(matches!(
        policy.decide(1, &TransportError::Unexpected("tls".into())),
        RetryDecision::GiveUp(DeliveryError::Unexpected(_))
    ));
}

#[test]
fn test_zero_attempt_policy_still_tries_once() {
    let policy = RetryPolicy::new(0);
    assert!(matches!(
        policy.decide(1, &smtp_error()),
        RetryDecision::GiveUp(DeliveryError::RetriesExhausted { attempts: 1, .. })
    ));
}

// --- message contents ---

#[test]
fn test_submission_summary() {
    let timestamp = Local.with_ymd_and_hms(2025, 8, 11, 12, 46, 25).single().unwrap();
    let summary = submission_summary(&fields(), "r.morsman@madaq.com", &timestamp);

    assert!(summary.starts_with("New Employee Contact Form Submission\n"));
    assert!(summary.contains("Date & Time: 2025-08-11 12:46:25\n"));
    assert!(summary.contains("Full Name: Robert Morsman\n"));
    assert!(summary.contains("Phone Number: 06 37011614 (normalized: +31637011614)\n"));
    assert!(summary.contains("Favourite Bonbon: Yuzu caramel\n"));
    assert!(summary.contains("Generated Company Email: r.morsman@madaq.com\n"));
    assert!(summary.contains("Next Steps for r.morsman@madaq.com:\n"));
    assert!(summary.contains("1. Create company email account: r.morsman@madaq.com\n"));
}

#[test]
fn test_build_message_structure() {
    let timestamp = Local.with_ymd_and_hms(2025, 8, 11, 12, 46, 25).single().unwrap();
    let signature = SignatureGenerator::default().generate(&fields());
    let message = build_message(&settings(), &fields(), &signature, &timestamp).unwrap();

    let raw = message.formatted();
    let parsed = mailparse::parse_mail(&raw).unwrap();
    let headers = parsed.get_headers();

    assert_eq!(
        headers.get_first_value("Subject").unwrap(),
        "New Employee Contact Info - Robert Morsman"
    );
    assert!(headers.get_first_value("From").unwrap().contains("forms@madaq.com"));
    assert!(headers.get_first_value("To").unwrap().contains("r.morsman@madaq.com"));
    assert!(
        headers
            .get_first_value("Reply-To")
            .unwrap()
            .contains("robert@example.com")
    );
    assert_eq!(parsed.ctype.mimetype, "multipart/mixed");
    assert_eq!(parsed.subparts.len(), 2);

    let body = parsed.subparts[0].get_body().unwrap();
    assert_eq!(parsed.subparts[0].ctype.mimetype, "text/plain");
    assert!(body.contains("Generated Company Email: r.morsman@madaq.com"));

    let attachment = &parsed.subparts[1];
    assert_eq!(attachment.ctype.mimetype, "text/html");
    assert_eq!(
        attachment
            .get_content_disposition()
            .params
            .get("filename")
            .map(String::as_str),
        Some("RobertMorsman_signature.html")
    );
    assert!(attachment.get_body().unwrap().contains("Robert Morsman"));
}

#[test]
fn test_build_message_without_usable_reply_to() {
    let timestamp = Local.with_ymd_and_hms(2025, 8, 11, 12, 46, 25).single().unwrap();
    let fields = SubmissionFields {
        email: "not an address".into(),
        ..fields()
    };
    let signature = SignatureGenerator::default().generate(&fields);
    let message = build_message(&settings(), &fields, &signature, &timestamp).unwrap();

    let raw = message.formatted();
    let parsed = mailparse::parse_mail(&raw).unwrap();
    assert!(parsed.get_headers().get_first_value("Reply-To").is_none());
}
