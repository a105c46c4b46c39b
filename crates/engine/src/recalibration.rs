//! Priority Recalibration Engine
//!
//! Revises a lead's priority score and status from human feedback. Each
//! call is computed against the lead's current score, so repeated feedback
//! compounds. Converted is absorbing: a repeated conversion is a no-op and
//! any other feedback is refused.

use chrono::Utc;
use lead_pulse_config::{RecalibrationPolicy, RegistryConfig};
use lead_pulse_core::{
    clamp_priority, Error, FeedbackEvent, FeedbackOutcome, Lead, Result, MAX_PRIORITY,
};

#[derive(Debug, Clone, Default)]
pub struct PriorityRecalibrator {
    policy: RecalibrationPolicy,
}

impl PriorityRecalibrator {
    pub fn new(policy: RecalibrationPolicy) -> Self {
        Self { policy }
    }

    pub fn from_registry(config: &RegistryConfig) -> Self {
        Self::new(config.recalibration.clone())
    }

    pub fn policy(&self) -> &RecalibrationPolicy {
        &self.policy
    }

    /// New score for a given outcome, clamped to [0, 10]
    pub fn recalibrated_score(&self, current: f64, outcome: FeedbackOutcome) -> f64 {
        let raw = match outcome {
            FeedbackOutcome::Converted => self.policy.converted_score,
            FeedbackOutcome::RejectedWithReview => {
                current * self.policy.reject_with_review_multiplier
            }
            FeedbackOutcome::Dismissed => current * self.policy.dismiss_multiplier,
            FeedbackOutcome::Accepted => {
                (current * self.policy.accept_multiplier).min(MAX_PRIORITY)
            }
        };
        clamp_priority(raw)
    }

    /// Apply one feedback event and return the updated lead
    ///
    /// The input lead is never modified; on error nothing changes.
    pub fn apply_feedback(&self, lead: &Lead, event: &FeedbackEvent) -> Result<Lead> {
        event.validate()?;

        if lead.status.is_terminal() {
            if event.outcome == FeedbackOutcome::Converted {
                tracing::debug!(lead_id = %lead.id, "Lead already converted");
                return Ok(lead.clone());
            }
            return Err(Error::validation(
                "status",
                format!("lead {} is already {}", lead.id, lead.status),
            ));
        }

        let score = self.recalibrated_score(lead.priority_score, event.outcome);

        let mut updated = lead.clone();
        updated.status = event.outcome.resulting_status();
        updated.priority_score = score;
        updated.feedback_rating = event.rating;
        updated.product_fit = event.product_fit;
        updated.feedback_note = Some(event.details.render_note(event.outcome));
        updated.last_feedback = Some(event.details.clone());
        updated.updated_at = Utc::now();
        updated.version = lead.version + 1;

        tracing::debug!(
            lead_id = %lead.id,
            outcome = event.outcome.as_str(),
            from = lead.priority_score,
            to = score,
            status = %updated.status,
            "Priority recalibrated"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recalibrator() -> PriorityRecalibrator {
        PriorityRecalibrator::default()
    }

    #[test]
    fn test_scores() {
        let r = recalibrator();
        assert_eq!(r.recalibrated_score(6.0, FeedbackOutcome::RejectedWithReview), 3.0);
        assert!((r.recalibrated_score(6.0, FeedbackOutcome::Dismissed) - 4.8).abs() < 1e-9);
        assert_eq!(r.recalibrated_score(2.0, FeedbackOutcome::Converted), 10.0);
        assert!((r.recalibrated_score(5.0, FeedbackOutcome::Accepted) - 5.75).abs() < 1e-9);
    }

    #[test]
    fn test_accept_caps_at_max() {
        assert_eq!(
            recalibrator().recalibrated_score(9.0, FeedbackOutcome::Accepted),
            10.0
        );
    }

    #[test]
    fn test_rejection_never_negative() {
        let r = recalibrator();
        assert_eq!(r.recalibrated_score(0.0, FeedbackOutcome::Dismissed), 0.0);
        assert_eq!(r.recalibrated_score(-3.0, FeedbackOutcome::RejectedWithReview), 0.0);
    }

    fn lead() -> Lead {
        let engine = crate::LeadEngine::from_registry(&RegistryConfig::default()).unwrap();
        let signal = lead_pulse_core::RawSignal::new("sig", "Genset order for hospital");
        engine.ingest(&signal).unwrap().unwrap()
    }

    #[test]
    fn test_repeat_conversion_is_noop() {
        let r = recalibrator();
        let converted = r
            .apply_feedback(&lead(), &FeedbackEvent::new(FeedbackOutcome::Converted))
            .unwrap();

        let again = r
            .apply_feedback(&converted, &FeedbackEvent::new(FeedbackOutcome::Converted))
            .unwrap();
        assert_eq!(again.priority_score, 10.0);
        assert_eq!(again.status, lead_pulse_core::LeadStatus::Converted);
        assert_eq!(again.version, converted.version);

        let err = r
            .apply_feedback(&converted, &FeedbackEvent::new(FeedbackOutcome::Accepted))
            .unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "status"));
    }

    #[test]
    fn test_rating_belongs_to_latest_feedback() {
        let r = recalibrator();
        let rated = r
            .apply_feedback(
                &lead(),
                &FeedbackEvent::new(FeedbackOutcome::Accepted).with_rating(5),
            )
            .unwrap();
        assert_eq!(rated.feedback_rating, Some(5));

        let unrated = r
            .apply_feedback(
                &rated,
                &FeedbackEvent::new(FeedbackOutcome::Dismissed).with_reason("Duplicate"),
            )
            .unwrap();
        assert_eq!(unrated.feedback_rating, None);
        assert!(unrated.feedback_note.unwrap().starts_with("REASON: Duplicate"));
    }

    #[test]
    fn test_custom_policy() {
        let r = PriorityRecalibrator::new(RecalibrationPolicy {
            dismiss_multiplier: 0.5,
            ..Default::default()
        });
        assert_eq!(r.recalibrated_score(6.0, FeedbackOutcome::Dismissed), 3.0);
    }
}
