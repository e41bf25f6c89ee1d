//! # Submission Relay
//!
//! Takes a quiz submission, turns it into one payload per integration and
//! pushes both out concurrently:
//!
//! - the CRM (Systeme.io) receives the contact with a tag derived from the
//!   quiz profile and the answers flattened into a custom field;
//! - the automation webhook (Make) receives the raw submission.
//!
//! Both calls always run to completion. The submission is considered handled
//! as soon as one integration accepted it; only a double failure is reported
//! back to the caller.

pub mod error;
pub mod forwarder;
pub mod payload;
pub mod reporter;

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use common::requests::QuizSubmission;
use common::responses::DownstreamDetails;
use futures_util::future::join;
use log::{info, warn};
use reqwest::Client;
use uuid::Uuid;

use crate::config::RelayConfig;
use error::RelayError;
use forwarder::{Delivery, Forwarder, HttpForwarder};
use reporter::{ErrorReporter, LogReporter};

/// What both integrations answered for an accepted submission.
#[derive(Debug)]
pub struct RelayOutcome {
    pub submission_id: Uuid,
    pub crm: Delivery,
    pub automation: Delivery,
}

pub struct SubmissionRelay {
    crm: Arc<dyn Forwarder>,
    automation: Arc<dyn Forwarder>,
    reporter: Arc<dyn ErrorReporter>,
}

impl SubmissionRelay {
    pub fn new(
        crm: Arc<dyn Forwarder>,
        automation: Arc<dyn Forwarder>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            crm,
            automation,
            reporter,
        }
    }

    /// Relay talking to the configured endpoints over HTTP, reporting to the log.
    pub fn from_config(config: &RelayConfig) -> Result<Self, RelayError> {
        let client = Client::builder()
            .user_agent(concat!("quiz-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::new(
            Arc::new(HttpForwarder::crm(
                client.clone(),
                &config.crm_url,
                &config.crm_api_key,
            )),
            Arc::new(HttpForwarder::automation(client, &config.automation_url)),
            Arc::new(LogReporter),
        ))
    }

    /// Validates and forwards one submission.
    ///
    /// Missing required fields fail before anything is sent. Internal errors
    /// are handed to the reporter before being returned.
    pub async fn relay(&self, submission: QuizSubmission) -> Result<RelayOutcome, RelayError> {
        let submission_id = Uuid::new_v4();

        let missing = submission.missing_required();
        if !missing.is_empty() {
            info!(
                "Submission {} rejected, missing: {}",
                submission_id,
                missing.join(", ")
            );
            return Err(RelayError::MissingFields(missing));
        }

        match self.forward_both(submission_id, submission).await {
            Err(err) if err.is_internal() => {
                self.reporter.report(&submission_id, &err);
                Err(err)
            }
            other => other,
        }
    }

    async fn forward_both(
        &self,
        submission_id: Uuid,
        submission: QuizSubmission,
    ) -> Result<RelayOutcome, RelayError> {
        // Nothing is sent unless every destination is usable.
        self.crm.ready()?;
        self.automation.ready()?;

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let crm_body = serde_json::to_value(payload::crm_payload(&submission, timestamp))?;
        let automation_body = serde_json::to_value(payload::automation_payload(submission))?;

        let crm = Arc::clone(&self.crm);
        let automation = Arc::clone(&self.automation);
        let (crm_result, automation_result) = join(
            tokio::spawn(async move { crm.forward(&crm_body).await }),
            tokio::spawn(async move { automation.forward(&automation_body).await }),
        )
        .await;
        let crm = crm_result??;
        let automation = automation_result??;

        match (crm.is_success(), automation.is_success()) {
            (false, false) => {
                warn!(
                    "Submission {} rejected by both integrations ({}: {:?}, {}: {:?})",
                    submission_id,
                    self.crm.name(),
                    crm.status,
                    self.automation.name(),
                    automation.status
                );
                Err(RelayError::Downstream(DownstreamDetails {
                    systeme: crm.status,
                    systeme_body: crm.body,
                    make: automation.status,
                    make_body: automation.body,
                }))
            }
            (crm_ok, automation_ok) => {
                // The failing side's data is dropped; nothing retries it.
                for (ok, name, delivery) in [
                    (crm_ok, self.crm.name(), &crm),
                    (automation_ok, self.automation.name(), &automation),
                ] {
                    if !ok {
                        warn!(
                            "Submission {} dropped by {} (status {:?}, error {:?})",
                            submission_id, name, delivery.status, delivery.error
                        );
                    }
                }
                Ok(RelayOutcome {
                    submission_id,
                    crm,
                    automation,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Answers every call with a fixed delivery and records what it was sent.
    struct FakeForwarder {
        answer: Result<Delivery, &'static str>,
        calls: AtomicUsize,
        received: Mutex<Vec<Value>>,
    }

    impl FakeForwarder {
        fn answering(status: u16) -> Arc<Self> {
            Arc::new(Self {
                answer: Ok(Delivery::answered(status, format!("status {}", status))),
                calls: AtomicUsize::new(0),
                received: Mutex::new(Vec::new()),
            })
        }

        fn unreachable() -> Arc<Self> {
            Arc::new(Self {
                answer: Ok(Delivery::unreachable("connection refused")),
                calls: AtomicUsize::new(0),
                received: Mutex::new(Vec::new()),
            })
        }

        fn misconfigured() -> Arc<Self> {
            Arc::new(Self {
                answer: Err("relative URL without a base"),
                calls: AtomicUsize::new(0),
                received: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_body(&self) -> Value {
            self.received.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Forwarder for FakeForwarder {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn ready(&self) -> Result<(), RelayError> {
            match &self.answer {
                Ok(_) => Ok(()),
                Err(reason) => Err(RelayError::Destination {
                    integration: "fake",
                    reason: reason.to_string(),
                }),
            }
        }

        async fn forward(&self, body: &Value) -> Result<Delivery, RelayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.received.lock().unwrap().push(body.clone());
            match &self.answer {
                Ok(delivery) => Ok(delivery.clone()),
                Err(reason) => Err(RelayError::Destination {
                    integration: "fake",
                    reason: reason.to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        reports: Mutex<Vec<String>>,
    }

    impl ErrorReporter for RecordingReporter {
        fn report(&self, _submission_id: &Uuid, error: &RelayError) {
            self.reports.lock().unwrap().push(error.to_string());
        }
    }

    fn relay_with(
        crm: &Arc<FakeForwarder>,
        automation: &Arc<FakeForwarder>,
    ) -> (SubmissionRelay, Arc<RecordingReporter>) {
        let reporter = Arc::new(RecordingReporter::default());
        let relay = SubmissionRelay::new(crm.clone(), automation.clone(), reporter.clone());
        (relay, reporter)
    }

    fn ana() -> QuizSubmission {
        serde_json::from_value(json!({
            "firstName": "Ana",
            "email": "a@x.com",
            "profile": "C",
            "answers": ["1", "3", "2"],
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn forwards_expected_payloads() {
        let crm = FakeForwarder::answering(200);
        let automation = FakeForwarder::answering(200);
        let (relay, reporter) = relay_with(&crm, &automation);

        let outcome = relay.relay(ana()).await.unwrap();
        assert!(outcome.crm.is_success());
        assert!(outcome.automation.is_success());

        let crm_body = crm.last_body();
        assert_eq!(crm_body["tags"], json!(["femme-alchimiste"]));
        assert_eq!(crm_body["fields"]["quizAnswers"], json!("1,3,2"));
        assert_eq!(crm_body["fields"]["source"], json!("quiz-entrepreneures"));

        let timestamp = crm_body["fields"]["timestamp"].as_str().unwrap();
        let parsed = chrono::DateTime::parse_from_rfc3339(timestamp).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        // e.g. 2025-01-01T10:00:00.123Z
        assert_eq!(timestamp.len(), 24);
        let (seconds, fraction) = timestamp.split_once('.').unwrap();
        assert_eq!(seconds.len(), 19);
        assert_eq!(fraction.len(), 4);
        assert!(fraction[..3].bytes().all(|b| b.is_ascii_digit()));
        assert!(fraction.ends_with('Z'));

        let automation_body = automation.last_body();
        assert_eq!(automation_body["answers"], json!(["1", "3", "2"]));
        assert_eq!(automation_body["phone"], json!(""));
        assert!(reporter.reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_fields_send_nothing() {
        let cases = [
            json!({ "email": "a@x.com", "profile": "A" }),
            json!({ "firstName": "Ana", "profile": "A" }),
            json!({ "firstName": "Ana", "email": "a@x.com" }),
            json!({ "firstName": "", "email": "", "profile": "" }),
            json!({}),
        ];

        for case in cases {
            let crm = FakeForwarder::answering(200);
            let automation = FakeForwarder::answering(200);
            let (relay, _) = relay_with(&crm, &automation);

            let submission: QuizSubmission = serde_json::from_value(case).unwrap();
            let err = relay.relay(submission).await.unwrap_err();

            assert!(matches!(err, RelayError::MissingFields(_)));
            assert_eq!(crm.calls(), 0);
            assert_eq!(automation.calls(), 0);
        }
    }

    #[tokio::test]
    async fn one_success_is_enough() {
        let cases = [(200, 500), (500, 200), (201, 204)];

        for (crm_status, automation_status) in cases {
            let crm = FakeForwarder::answering(crm_status);
            let automation = FakeForwarder::answering(automation_status);
            let (relay, _) = relay_with(&crm, &automation);

            assert!(relay.relay(ana()).await.is_ok());
            assert_eq!(crm.calls(), 1);
            assert_eq!(automation.calls(), 1);
        }
    }

    #[tokio::test]
    async fn unreachable_integration_is_tolerated() {
        let crm = FakeForwarder::unreachable();
        let automation = FakeForwarder::answering(200);
        let (relay, _) = relay_with(&crm, &automation);

        let outcome = relay.relay(ana()).await.unwrap();
        assert_eq!(outcome.crm.status, None);
    }

    #[tokio::test]
    async fn double_failure_is_a_downstream_error() {
        let crm = FakeForwarder::answering(401);
        let automation = FakeForwarder::unreachable();
        let (relay, reporter) = relay_with(&crm, &automation);

        let err = relay.relay(ana()).await.unwrap_err();
        match err {
            RelayError::Downstream(details) => {
                assert_eq!(details.systeme, Some(401));
                assert_eq!(details.systeme_body, "status 401");
                assert_eq!(details.make, None);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(reporter.reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn misconfigured_destination_stops_before_any_call() {
        for crm_is_broken in [true, false] {
            let (crm, automation) = if crm_is_broken {
                (FakeForwarder::misconfigured(), FakeForwarder::answering(200))
            } else {
                (FakeForwarder::answering(200), FakeForwarder::misconfigured())
            };
            let (relay, _) = relay_with(&crm, &automation);

            let err = relay.relay(ana()).await.unwrap_err();
            assert!(err.is_internal());
            assert_eq!(crm.calls(), 0);
            assert_eq!(automation.calls(), 0);
        }
    }

    #[tokio::test]
    async fn internal_errors_are_reported() {
        let crm = FakeForwarder::misconfigured();
        let automation = FakeForwarder::answering(200);
        let (relay, reporter) = relay_with(&crm, &automation);

        let err = relay.relay(ana()).await.unwrap_err();
        assert!(err.is_internal());

        let reports = reporter.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("relative URL without a base"));
    }
}
