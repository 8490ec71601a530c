//! Surveyor matcher
//!
//! Selects candidates for a new claim:
//! 1. Keep surveyors that are `Available` with case-load headroom
//! 2. Health claims keep only `Health Claims` specialists, motor claims
//!    only `Motor Claims`; other claim types keep every specialization
//! 3. Rank by rating descending, ties broken by fewer active cases
//!
//! The ranking is deterministic for a fixed roster. Location, when given,
//! narrows the pool only if somebody actually works that location;
//! otherwise it is ignored rather than failing the claim.

use claimflow_model::{ClaimKind, Specialization, Surveyor};
use claimflow_store::SurveyorSelector;
use std::cmp::Ordering;

/// Specialization required for a claim kind, if the kind is restricted
#[inline]
#[must_use]
pub fn required_specialization(kind: ClaimKind) -> Option<Specialization> {
    match kind {
        ClaimKind::Health => Some(Specialization::HealthClaims),
        ClaimKind::Motor => Some(Specialization::MotorClaims),
        ClaimKind::Property | ClaimKind::Travel => None,
    }
}

/// Rank the roster for a claim. Returns every eligible candidate, best
/// first; empty means no surveyor can take the claim.
#[must_use]
pub fn rank(roster: &[Surveyor], kind: Option<ClaimKind>, location: Option<&str>) -> Vec<Surveyor> {
    let specialization = kind.and_then(required_specialization);

    let mut candidates: Vec<Surveyor> = roster
        .iter()
        .filter(|s| s.has_capacity())
        .filter(|s| specialization.map_or(true, |required| s.specialization == required))
        .cloned()
        .collect();

    if let Some(location) = location {
        let local: Vec<Surveyor> = candidates
            .iter()
            .filter(|s| s.location.eq_ignore_ascii_case(location))
            .cloned()
            .collect();
        if !local.is_empty() {
            candidates = local;
        }
    }

    candidates.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(Ordering::Equal)
            .then(a.current_cases.cmp(&b.current_cases))
    });
    candidates
}

/// Selector for the store's reserve path: picks the single top candidate.
/// Runs under the surveyors lock, so the pick and the case-load increment
/// cannot interleave with another submission.
#[must_use]
pub fn selector(kind: ClaimKind, location: Option<String>) -> SurveyorSelector {
    Box::new(move |roster| {
        rank(roster, Some(kind), location.as_deref())
            .first()
            .map(|s| s.id.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimflow_model::{Availability, SurveyorId};

    fn surveyor(
        id: &str,
        specialization: Specialization,
        rating: f32,
        current: u32,
        max: u32,
    ) -> Surveyor {
        Surveyor {
            id: SurveyorId::from(id),
            name: format!("Surveyor {id}"),
            phone: "+91-98".to_string(),
            specialization,
            location: "Mumbai".to_string(),
            current_cases: current,
            max_cases: max,
            rating,
            status: Availability::Available,
        }
    }

    #[test]
    fn ranks_by_rating_descending() {
        let roster = vec![
            surveyor("a", Specialization::HealthClaims, 3.9, 0, 5),
            surveyor("b", Specialization::HealthClaims, 4.8, 0, 5),
            surveyor("c", Specialization::HealthClaims, 4.2, 0, 5),
        ];
        let ranked = rank(&roster, Some(ClaimKind::Health), None);
        let ids: Vec<_> = ranked.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn rating_ties_break_on_case_load() {
        let roster = vec![
            surveyor("busy", Specialization::MotorClaims, 4.5, 3, 5),
            surveyor("idle", Specialization::MotorClaims, 4.5, 1, 5),
        ];
        let ranked = rank(&roster, Some(ClaimKind::Motor), None);
        assert_eq!(ranked[0].id.as_str(), "idle");
        assert_eq!(ranked[1].id.as_str(), "busy");
    }

    #[test]
    fn health_claims_keep_only_health_specialists() {
        let roster = vec![
            surveyor("m", Specialization::MotorClaims, 5.0, 0, 5),
            surveyor("h", Specialization::HealthClaims, 3.0, 0, 5),
        ];
        let ranked = rank(&roster, Some(ClaimKind::Health), None);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].specialization, Specialization::HealthClaims);
    }

    #[test]
    fn property_claims_keep_every_specialization() {
        let roster = vec![
            surveyor("m", Specialization::MotorClaims, 4.0, 0, 5),
            surveyor("h", Specialization::HealthClaims, 4.5, 0, 5),
            surveyor("p", Specialization::PropertyClaims, 4.2, 0, 5),
        ];
        let ranked = rank(&roster, Some(ClaimKind::Property), None);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn full_or_busy_surveyors_are_excluded() {
        let mut full = surveyor("full", Specialization::HealthClaims, 5.0, 5, 5);
        full.current_cases = full.max_cases;
        let mut away = surveyor("away", Specialization::HealthClaims, 5.0, 0, 5);
        away.status = Availability::Busy;
        let ok = surveyor("ok", Specialization::HealthClaims, 1.0, 0, 5);

        let ranked = rank(&[full, away, ok], Some(ClaimKind::Health), None);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id.as_str(), "ok");
    }

    #[test]
    fn location_narrows_only_when_somebody_matches() {
        let mut pune = surveyor("pune", Specialization::HealthClaims, 3.0, 0, 5);
        pune.location = "Pune".to_string();
        let mumbai = surveyor("mum", Specialization::HealthClaims, 5.0, 0, 5);

        let ranked = rank(
            &[pune.clone(), mumbai.clone()],
            Some(ClaimKind::Health),
            Some("pune"),
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id.as_str(), "pune");

        // Nobody in Chennai: fall back to the full pool
        let ranked = rank(&[pune, mumbai], Some(ClaimKind::Health), Some("Chennai"));
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn ranking_is_deterministic() {
        let roster = vec![
            surveyor("a", Specialization::HealthClaims, 4.1, 2, 5),
            surveyor("b", Specialization::HealthClaims, 4.7, 1, 5),
            surveyor("c", Specialization::HealthClaims, 4.7, 3, 5),
        ];
        let first = rank(&roster, Some(ClaimKind::Health), None);
        let second = rank(&roster, Some(ClaimKind::Health), None);
        assert_eq!(first, second);
        let ids: Vec<_> = first.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn selector_picks_the_top_candidate() {
        let roster = vec![
            surveyor("low", Specialization::MotorClaims, 2.0, 0, 5),
            surveyor("top", Specialization::MotorClaims, 4.9, 0, 5),
        ];
        let pick = selector(ClaimKind::Motor, None)(&roster);
        assert_eq!(pick, Some(SurveyorId::from("top")));
    }

    #[test]
    fn selector_returns_none_for_empty_pool() {
        let roster = vec![surveyor("m", Specialization::MotorClaims, 4.0, 0, 5)];
        let pick = selector(ClaimKind::Health, None)(&roster);
        assert_eq!(pick, None);
    }
}
