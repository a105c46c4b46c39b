//! Lead intake
//!
//! Wires the classifier, proximity resolver, officer resolver and
//! recalibrator together. Every component is immutable after construction,
//! so one `LeadEngine` can serve any number of threads.

use chrono::Utc;
use lead_pulse_config::{IntakeConfig, RegistryConfig};
use lead_pulse_core::{
    clamp_priority, ClassificationResult, Error, Facility, FeedbackEvent, Lead, LeadStatus,
    Officer, ProductFit, Provenance, RawSignal, Result,
};

use crate::assignment::OfficerResolver;
use crate::classifier::SignalClassifier;
use crate::entity::normalize_company;
use crate::proximity::ProximityResolver;
use crate::recalibration::PriorityRecalibrator;

/// Outcome of a batch ingest
#[derive(Debug, Default)]
pub struct IngestReport {
    pub leads: Vec<Lead>,
    /// Signal IDs no rule matched
    pub unmatched: Vec<String>,
    /// Signal IDs that could not be turned into leads
    pub failed: Vec<(String, Error)>,
}

impl IngestReport {
    pub fn total(&self) -> usize {
        self.leads.len() + self.unmatched.len() + self.failed.len()
    }
}

/// Lead scoring and routing pipeline
#[derive(Debug, Clone)]
pub struct LeadEngine {
    classifier: SignalClassifier,
    proximity: ProximityResolver,
    officers: OfficerResolver,
    recalibrator: PriorityRecalibrator,
    intake: IntakeConfig,
}

impl LeadEngine {
    pub fn new(
        classifier: SignalClassifier,
        proximity: ProximityResolver,
        officers: OfficerResolver,
        recalibrator: PriorityRecalibrator,
        intake: IntakeConfig,
    ) -> Self {
        Self {
            classifier,
            proximity,
            officers,
            recalibrator,
            intake,
        }
    }

    /// Build every component from one registry snapshot
    pub fn from_registry(config: &RegistryConfig) -> Result<Self> {
        Ok(Self::new(
            SignalClassifier::from_registry(config)?,
            ProximityResolver::from_registry(config)?,
            OfficerResolver::from_registry(config),
            PriorityRecalibrator::from_registry(config),
            config.intake.clone(),
        ))
    }

    pub fn classify(&self, text: &str) -> Option<ClassificationResult> {
        self.classifier.classify(text)
    }

    pub fn nearest_facility(&self, latitude: f64, longitude: f64) -> Result<(&Facility, f64)> {
        self.proximity.nearest_facility(latitude, longitude)
    }

    pub fn assign_officer(&self, location: &str) -> &Officer {
        self.officers.assign_officer(location)
    }

    pub fn apply_feedback(&self, lead: &Lead, event: &FeedbackEvent) -> Result<Lead> {
        self.recalibrator.apply_feedback(lead, event)
    }

    pub fn classifier(&self) -> &SignalClassifier {
        &self.classifier
    }

    pub fn proximity(&self) -> &ProximityResolver {
        &self.proximity
    }

    pub fn officers(&self) -> &OfficerResolver {
        &self.officers
    }

    /// Turn a raw signal into a `New` lead
    ///
    /// Returns `Ok(None)` when no product rule matches; no lead is created.
    pub fn ingest(&self, signal: &RawSignal) -> Result<Option<Lead>> {
        let Some(classification) = self.classifier.classify(&signal.text) else {
            tracing::debug!(signal_id = %signal.id, "No product rule matched");
            return Ok(None);
        };

        let company_name = non_blank(signal.company_name.as_deref())
            .unwrap_or(self.intake.company_placeholder.as_str())
            .to_string();
        let normalized_company = match non_blank(signal.company_name.as_deref()) {
            Some(name) => normalize_company(name),
            None => company_name.clone(),
        };
        let location = non_blank(signal.location.as_deref())
            .unwrap_or(self.intake.location_placeholder.as_str())
            .to_string();

        let proximity = signal
            .coordinates
            .map(|site| self.proximity.resolve(site))
            .transpose()?;
        let estimated_volume = self.proximity.estimate_volume(&classification.industry);
        let officer = self.officers.assign_officer(&location);

        let depot = proximity
            .as_ref()
            .map(|p| p.nearest_facility.as_str())
            .unwrap_or("the nearest depot");
        let next_action = format!(
            "Reach out to procurement regarding {} supply from {}.",
            classification.product, depot
        );

        let now = Utc::now();
        let lead = Lead {
            id: uuid::Uuid::new_v4().to_string(),
            provenance: Provenance {
                signal_id: signal.id.clone(),
                raw_text: signal.text.trim().to_string(),
                source_url: signal.source_url.clone(),
                processed: true,
            },
            company_name,
            normalized_company,
            industry_sector: classification.industry.clone(),
            recommended_product: classification.product.clone(),
            secondary_product: classification.secondary_product.clone(),
            confidence_score: classification.confidence,
            reasoning: classification.reasoning.clone(),
            location,
            proximity,
            estimated_volume,
            assigned_officer: officer.to_ref(),
            next_action,
            status: LeadStatus::New,
            priority_score: clamp_priority(f64::from(classification.confidence) / 10.0),
            urgency_score: self.urgency_score(&signal.text),
            feedback_rating: None,
            product_fit: ProductFit::Unknown,
            last_feedback: None,
            feedback_note: None,
            is_verified: signal
                .source_trust
                .is_some_and(|trust| trust >= self.intake.verification_threshold),
            dispatched_at: None,
            created_at: now,
            updated_at: now,
            version: 0,
        };

        tracing::info!(
            lead_id = %lead.id,
            signal_id = %signal.id,
            product = %lead.recommended_product,
            officer = %lead.assigned_officer.name,
            priority = lead.priority_score,
            "Lead created"
        );

        Ok(Some(lead))
    }

    /// Ingest many signals; one bad signal does not stop the batch
    pub fn ingest_batch(&self, signals: &[RawSignal]) -> IngestReport {
        let mut report = IngestReport::default();
        for signal in signals {
            match self.ingest(signal) {
                Ok(Some(lead)) => report.leads.push(lead),
                Ok(None) => report.unmatched.push(signal.id.clone()),
                Err(e) => {
                    tracing::warn!(signal_id = %signal.id, error = %e, "Signal rejected");
                    report.failed.push((signal.id.clone(), e));
                }
            }
        }

        tracing::info!(
            total = report.total(),
            created = report.leads.len(),
            unmatched = report.unmatched.len(),
            failed = report.failed.len(),
            "Batch ingest complete"
        );
        report
    }

    /// Informational urgency; does not feed the priority score
    fn urgency_score(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let urgent = self
            .intake
            .urgency_cues
            .iter()
            .any(|cue| !cue.is_empty() && lowered.contains(&cue.to_lowercase()));

        if urgent {
            self.intake.high_urgency_score
        } else {
            self.intake.base_urgency_score
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
