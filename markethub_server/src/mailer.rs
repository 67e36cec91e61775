//! Email delivery is an external collaborator: the marketplace only needs "send this
//! verification link to this address" as a capability. The default implementation logs the link
//! instead of sending anything, which is also what the test and dev environments want.

use log::*;

pub trait VerificationMailer: Send + Sync {
    /// Deliver the verification link to the address. Best-effort: a failed send does not fail
    /// the signup that triggered it.
    fn send_verification(&self, email: &str, link: &str);
}

/// Writes the verification link to the log. Stands in wherever a real SMTP relay would go.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

impl VerificationMailer for LogMailer {
    fn send_verification(&self, email: &str, link: &str) {
        info!("📧️ Verification email for {email}: {link}");
    }
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use super::VerificationMailer;

    /// Captures outgoing mail for assertions.
    #[derive(Default, Clone)]
    pub struct RecordingMailer {
        pub sent: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl VerificationMailer for RecordingMailer {
        fn send_verification(&self, email: &str, link: &str) {
            self.sent.lock().unwrap().push((email.to_string(), link.to_string()));
        }
    }

    #[test]
    fn recording_mailer_captures_sends() {
        let mailer = RecordingMailer::default();
        mailer.send_verification("cass@example.com", "http://localhost:5000/api/auth/verify-email?token=abc");
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "cass@example.com");
    }
}
