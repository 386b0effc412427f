//! Email signup flow
//!
//! The hero, footer and call-to-action sections each carry an email form.
//! Submissions go to an opaque [`SignupSink`]; the outcome is reported to the
//! visitor through a [`Notifier`]. Failures never escape the form and nothing
//! is retried, the visitor resubmits.
//!
//! Submission is split into [`SignupForm::begin`] and [`SignupForm::finish`]
//! so a shared form need not stay borrowed across the sink's await point.

mod email;

pub use email::EmailAddress;

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::SignupError;

pub const SUCCESS_TITLE: &str = "You're on the list! We'll be in touch soon.";
pub const SUCCESS_DETAIL: &str = "Get ready for your endless closet experience.";
pub const FAILURE_TITLE: &str = "Oops! Something went wrong.";
pub const FAILURE_DETAIL: &str = "Please try again later.";
pub const INVALID_TITLE: &str = "That email doesn't look right.";
pub const INVALID_DETAIL: &str = "Please check the address and try again.";

/// Page section a signup came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupSource {
    Hero,
    Footer,
    Cta,
}

impl SignupSource {
    pub fn as_str(self) -> &'static str {
        match self {
            SignupSource::Hero => "hero",
            SignupSource::Footer => "footer",
            SignupSource::Cta => "cta",
        }
    }
}

impl FromStr for SignupSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hero" => Ok(SignupSource::Hero),
            "footer" => Ok(SignupSource::Footer),
            "cta" => Ok(SignupSource::Cta),
            other => Err(format!("unknown signup source: {other}")),
        }
    }
}

/// Where signups are sent
#[async_trait(?Send)]
pub trait SignupSink {
    async fn submit_signup(&self, email: &EmailAddress, source: SignupSource) -> Result<(), SignupError>;
}

/// Transient user-facing notifications
pub trait Notifier {
    fn success(&self, title: &str, detail: &str);
    fn error(&self, title: &str, detail: &str);
}

/// Result of a submit attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty input or a submission already in flight
    Ignored,
    /// Input is not an email address
    Rejected,
    /// Sink accepted the signup
    Accepted,
    /// Sink failed
    Failed,
}

/// A submission handed out by [`SignupForm::begin`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSignup {
    pub email: EmailAddress,
    pub source: SignupSource,
}

/// Controller behind one email form
#[derive(Clone, Debug)]
pub struct SignupForm {
    source: SignupSource,
    input: String,
    submitting: bool,
}

impl SignupForm {
    pub fn new(source: SignupSource) -> Self {
        Self {
            source,
            input: String::new(),
            submitting: false,
        }
    }

    pub fn source(&self) -> SignupSource {
        self.source
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate the input and mark the form as submitting
    pub fn begin<N: Notifier + ?Sized>(&mut self, notifier: &N) -> Result<PendingSignup, SubmitOutcome> {
        if self.submitting || self.input.trim().is_empty() {
            return Err(SubmitOutcome::Ignored);
        }
        let email = match EmailAddress::parse(&self.input) {
            Ok(email) => email,
            Err(err) => {
                log::debug!("signup[{}]: {}", self.source.as_str(), err);
                notifier.error(INVALID_TITLE, INVALID_DETAIL);
                return Err(SubmitOutcome::Rejected);
            }
        };
        self.submitting = true;
        Ok(PendingSignup {
            email,
            source: self.source,
        })
    }

    /// Apply the sink's answer
    pub fn finish<N: Notifier + ?Sized>(
        &mut self,
        pending: PendingSignup,
        result: Result<(), SignupError>,
        notifier: &N,
    ) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(()) => {
                log::debug!("signup[{}]: accepted {}", pending.source.as_str(), pending.email);
                self.input.clear();
                notifier.success(SUCCESS_TITLE, SUCCESS_DETAIL);
                SubmitOutcome::Accepted
            }
            Err(err) => {
                log::warn!("signup[{}]: {}", pending.source.as_str(), err);
                notifier.error(FAILURE_TITLE, FAILURE_DETAIL);
                SubmitOutcome::Failed
            }
        }
    }

    /// Run a whole submission against `sink`
    pub async fn submit<S, N>(&mut self, sink: &S, notifier: &N) -> SubmitOutcome
    where
        S: SignupSink + ?Sized,
        N: Notifier + ?Sized,
    {
        let pending = match self.begin(notifier) {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };
        let result = sink.submit_signup(&pending.email, pending.source).await;
        self.finish(pending, result, notifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNotifier {
        toasts: RefCell<Vec<(bool, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, title: &str, _detail: &str) {
            self.toasts.borrow_mut().push((true, title.to_string()));
        }
        fn error(&self, title: &str, _detail: &str) {
            self.toasts.borrow_mut().push((false, title.to_string()));
        }
    }

    struct StubSink {
        result: Result<(), SignupError>,
        calls: RefCell<Vec<(String, SignupSource)>>,
    }

    impl StubSink {
        fn answering(result: Result<(), SignupError>) -> Self {
            Self { result, calls: RefCell::new(Vec::new()) }
        }
    }

    #[async_trait(?Send)]
    impl SignupSink for StubSink {
        async fn submit_signup(&self, email: &EmailAddress, source: SignupSource) -> Result<(), SignupError> {
            self.calls.borrow_mut().push((email.to_string(), source));
            self.result.clone()
        }
    }

    #[test]
    fn test_success_clears_input() {
        let sink = StubSink::answering(Ok(()));
        let notifier = RecordingNotifier::default();
        let mut form = SignupForm::new(SignupSource::Hero);
        form.set_input("ada@example.com");

        assert_eq!(block_on(form.submit(&sink, &notifier)), SubmitOutcome::Accepted);
        assert_eq!(form.input(), "");
        assert!(!form.is_submitting());
        assert_eq!(sink.calls.borrow()[0], ("ada@example.com".to_string(), SignupSource::Hero));
        assert_eq!(notifier.toasts.borrow()[0], (true, SUCCESS_TITLE.to_string()));
    }

    #[test]
    fn test_failure_keeps_input() {
        let sink = StubSink::answering(Err(SignupError::Rejected { status: 500 }));
        let notifier = RecordingNotifier::default();
        let mut form = SignupForm::new(SignupSource::Cta);
        form.set_input("ada@example.com");

        assert_eq!(block_on(form.submit(&sink, &notifier)), SubmitOutcome::Failed);
        assert_eq!(form.input(), "ada@example.com");
        assert_eq!(notifier.toasts.borrow()[0], (false, FAILURE_TITLE.to_string()));
        assert_eq!(sink.calls.borrow().len(), 1);
    }

    #[test]
    fn test_empty_input_is_ignored() {
        let sink = StubSink::answering(Ok(()));
        let notifier = RecordingNotifier::default();
        let mut form = SignupForm::new(SignupSource::Footer);
        form.set_input("   ");

        assert_eq!(block_on(form.submit(&sink, &notifier)), SubmitOutcome::Ignored);
        assert!(sink.calls.borrow().is_empty());
        assert!(notifier.toasts.borrow().is_empty());
    }

    #[test]
    fn test_malformed_input_never_reaches_sink() {
        let sink = StubSink::answering(Ok(()));
        let notifier = RecordingNotifier::default();
        let mut form = SignupForm::new(SignupSource::Footer);
        form.set_input("not-an-email");

        assert_eq!(block_on(form.submit(&sink, &notifier)), SubmitOutcome::Rejected);
        assert!(sink.calls.borrow().is_empty());
        assert!(!notifier.toasts.borrow()[0].0);
        assert_eq!(form.input(), "not-an-email");
    }

    #[test]
    fn test_no_double_submit() {
        let notifier = RecordingNotifier::default();
        let mut form = SignupForm::new(SignupSource::Hero);
        form.set_input("ada@example.com");

        let pending = form.begin(&notifier).unwrap();
        assert!(form.is_submitting());
        assert_eq!(form.begin(&notifier), Err(SubmitOutcome::Ignored));

        assert_eq!(form.finish(pending, Ok(()), &notifier), SubmitOutcome::Accepted);
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_source_round_trip() {
        assert_eq!("cta".parse::<SignupSource>(), Ok(SignupSource::Cta));
        assert!("sidebar".parse::<SignupSource>().is_err());
        assert_eq!(serde_json::to_string(&SignupSource::Hero).unwrap(), "\"hero\"");
    }
}
