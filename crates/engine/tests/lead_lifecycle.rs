//! Integration tests for the lead lifecycle (signal -> lead -> feedback -> dispatch)

use lead_pulse_config::{default_facilities, ProductRule, RegistryConfig, VolumeTable};
use lead_pulse_core::{
    Error, FeedbackEvent, FeedbackOutcome, FeedbackRequest, Lead, LeadStatus, ProductFit,
    RawSignal,
};
use lead_pulse_engine::{
    format_alert, mark_dispatched, next_priority_lead, LeadEngine, ProximityResolver,
};

fn engine() -> LeadEngine {
    LeadEngine::from_registry(&RegistryConfig::default()).unwrap()
}

/// Lead with a known priority score
fn lead_with_priority(engine: &LeadEngine, score: f64) -> Lead {
    let signal = RawSignal::new("sig", "Furnace upgrade at glass plant")
        .with_company("Apex Glass Ltd")
        .with_location("Ahmedabad, GJ");
    let mut lead = engine.ingest(&signal).unwrap().unwrap();
    lead.priority_score = score;
    lead
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_boiler_scenario() {
    let result = engine()
        .classify("New boiler installation underway at steel plant")
        .unwrap();

    assert_eq!(result.product, "Furnace Oil (FO)");
    assert_eq!(result.industry, "Manufacturing");
    assert_eq!(result.confidence, 90);
    assert!(result.reasoning.contains("boiler"));
}

#[test]
fn test_rejection_paths_use_distinct_multipliers() {
    let engine = engine();
    let lead = lead_with_priority(&engine, 6.0);

    let reviewed = engine
        .apply_feedback(
            &lead,
            &FeedbackEvent::new(FeedbackOutcome::RejectedWithReview).with_reason("Plant Closure"),
        )
        .unwrap();
    assert!(approx(reviewed.priority_score, 3.0));
    assert_eq!(reviewed.status, LeadStatus::Rejected);

    let dismissed = engine
        .apply_feedback(
            &lead,
            &FeedbackEvent::new(FeedbackOutcome::Dismissed).with_reason("Duplicate"),
        )
        .unwrap();
    assert!(approx(dismissed.priority_score, 4.8));
    assert_eq!(dismissed.status, LeadStatus::Rejected);
}

#[test]
fn test_conversion_sets_max_score() {
    let engine = engine();
    let lead = lead_with_priority(&engine, 9.0);

    let converted = engine
        .apply_feedback(&lead, &FeedbackEvent::new(FeedbackOutcome::Converted))
        .unwrap();
    assert_eq!(converted.priority_score, 10.0);
    assert_eq!(converted.status, LeadStatus::Converted);
}

#[test]
fn test_acceptance_compounds() {
    let engine = engine();
    let lead = lead_with_priority(&engine, 5.0);
    let accept = FeedbackEvent::new(FeedbackOutcome::Accepted);

    let once = engine.apply_feedback(&lead, &accept).unwrap();
    assert!(approx(once.priority_score, 5.75));

    let twice = engine.apply_feedback(&once, &accept).unwrap();
    assert!(approx(twice.priority_score, 6.6125));
    assert_eq!(twice.version, lead.version + 2);
}

#[test]
fn test_acceptance_never_exceeds_max() {
    let engine = engine();
    let mut lead = lead_with_priority(&engine, 9.5);
    for _ in 0..5 {
        lead = engine
            .apply_feedback(&lead, &FeedbackEvent::new(FeedbackOutcome::Accepted))
            .unwrap();
        assert!(lead.priority_score <= 10.0);
    }
    assert_eq!(lead.priority_score, 10.0);
}

#[test]
fn test_rejection_never_negative() {
    let engine = engine();
    let mut lead = lead_with_priority(&engine, 0.1);
    for _ in 0..10 {
        lead = engine
            .apply_feedback(
                &lead,
                &FeedbackEvent::new(FeedbackOutcome::Dismissed).with_reason("Not relevant"),
            )
            .unwrap();
        assert!(lead.priority_score >= 0.0);
    }
}

#[test]
fn test_feedback_on_converted_lead_rejected() {
    let engine = engine();
    let lead = lead_with_priority(&engine, 7.0);
    let converted = engine
        .apply_feedback(&lead, &FeedbackEvent::new(FeedbackOutcome::Converted))
        .unwrap();

    let err = engine
        .apply_feedback(
            &converted,
            &FeedbackEvent::new(FeedbackOutcome::RejectedWithReview),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn test_rejected_lead_can_be_revised() {
    let engine = engine();
    let lead = lead_with_priority(&engine, 8.0);
    let rejected = engine
        .apply_feedback(&lead, &FeedbackEvent::new(FeedbackOutcome::RejectedWithReview))
        .unwrap();
    let accepted = engine
        .apply_feedback(&rejected, &FeedbackEvent::new(FeedbackOutcome::Accepted))
        .unwrap();

    assert_eq!(accepted.status, LeadStatus::Accepted);
    assert!(approx(accepted.priority_score, 4.6));
}

#[test]
fn test_invalid_feedback_leaves_lead_untouched() {
    let engine = engine();
    let lead = lead_with_priority(&engine, 6.0);
    let snapshot = lead.clone();

    let missing_outcome = FeedbackRequest::default().into_event();
    assert!(missing_outcome.is_err());

    let bad_rating = FeedbackEvent::new(FeedbackOutcome::Accepted).with_rating(0);
    assert!(engine.apply_feedback(&lead, &bad_rating).is_err());

    let dismiss_without_reason = FeedbackEvent::new(FeedbackOutcome::Dismissed);
    assert!(engine.apply_feedback(&lead, &dismiss_without_reason).is_err());

    assert_eq!(lead, snapshot);
}

#[test]
fn test_feedback_records_structured_details() {
    let engine = engine();
    let lead = lead_with_priority(&engine, 6.0);
    let event = FeedbackEvent::new(FeedbackOutcome::RejectedWithReview)
        .with_rating(2)
        .with_product_fit(ProductFit::Mismatch)
        .with_competitor("IOCL")
        .with_reason("Competitor Active");

    let updated = engine.apply_feedback(&lead, &event).unwrap();

    assert_eq!(updated.feedback_rating, Some(2));
    assert_eq!(updated.product_fit, ProductFit::Mismatch);
    assert_eq!(
        updated.feedback_note.as_deref(),
        Some("Competitor: IOCL | Notes: No extra notes | Reason: Competitor Active")
    );
    assert_eq!(
        updated.last_feedback.as_ref().and_then(|d| d.competitor.as_deref()),
        Some("IOCL")
    );
    assert!(updated.updated_at >= lead.updated_at);
    assert_eq!(updated.version, lead.version + 1);
}

#[test]
fn test_nearest_facility_symmetric_under_reordering() {
    let forward = default_facilities();
    let mut reversed = forward.clone();
    reversed.reverse();

    let a = ProximityResolver::new(forward, VolumeTable::default()).unwrap();
    let b = ProximityResolver::new(reversed, VolumeTable::default()).unwrap();

    for (lat, lon) in [(21.1458, 79.0882), (12.9716, 77.5946), (26.9124, 75.7873)] {
        let (fa, da) = a.nearest_facility(lat, lon).unwrap();
        let (fb, db) = b.nearest_facility(lat, lon).unwrap();
        assert_eq!(fa.name, fb.name);
        assert_eq!(da, db);
    }
}

#[test]
fn test_zero_distance_at_every_facility() {
    let engine = engine();
    for facility in default_facilities() {
        let (nearest, dist) = engine
            .nearest_facility(facility.latitude, facility.longitude)
            .unwrap();
        assert_eq!(nearest.name, facility.name);
        assert_eq!(dist, 0.0);
    }
}

#[test]
fn test_first_rule_wins_in_custom_registry() {
    let config = RegistryConfig {
        products: vec![
            ProductRule::new("Alpha", &["pump"], "Agriculture", 70),
            ProductRule::new("Beta", &["pump", "pumping", "irrigation"], "Agriculture", 99),
        ],
        ..Default::default()
    };
    let engine = LeadEngine::from_registry(&config).unwrap();

    let result = engine.classify("Lift irrigation pumping station").unwrap();
    assert_eq!(result.product, "Alpha");
    assert_eq!(result.confidence, 70);
}

#[test]
fn test_parallel_ingest() {
    let engine = engine();
    let signals: Vec<RawSignal> = (0..64)
        .map(|i| {
            RawSignal::new(format!("sig-{i}"), "Textile mill adds jute spinning line")
                .with_location("Kolkata, WB")
        })
        .collect();

    let leads: Vec<Lead> = std::thread::scope(|s| {
        let handles: Vec<_> = signals
            .chunks(16)
            .map(|chunk| {
                let engine = &engine;
                s.spawn(move || engine.ingest_batch(chunk).leads)
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(leads.len(), 64);
    assert!(leads
        .iter()
        .all(|l| l.recommended_product == "Jute Batch Oil (JBO)" && l.assigned_officer.name == "Amit Das"));
}

#[test]
fn test_dispatch_flow() {
    let engine = engine();
    let low = lead_with_priority(&engine, 4.0);
    let high = lead_with_priority(&engine, 9.2);
    let mut accepted = lead_with_priority(&engine, 9.9);
    accepted.status = LeadStatus::Accepted;

    let leads = vec![low.clone(), high.clone(), accepted];
    let next = next_priority_lead(&leads).unwrap();
    assert_eq!(next.id, high.id);

    let officer = engine.assign_officer(&next.location);
    let alert = format_alert(next, officer);
    assert!(alert.contains("Entity: Apex Glass"));
    assert!(alert.contains("Product: Furnace Oil (FO)"));
    assert!(alert.contains("Priority: 9.2/10.0"));
    assert!(alert.contains("Site: Ahmedabad, GJ"));
    assert!(alert.contains("Officer: Priya Patel"));

    let dispatched = mark_dispatched(next);
    assert!(dispatched.dispatched_at.is_some());
    assert_eq!(dispatched.version, next.version + 1);

    let leads = vec![low.clone(), dispatched];
    assert_eq!(next_priority_lead(&leads).unwrap().id, low.id);
}

#[test]
fn test_dispatch_empty_queue() {
    assert!(next_priority_lead(&[]).is_none());
}
