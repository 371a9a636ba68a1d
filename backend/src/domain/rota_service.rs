//! Rota expansion engine.
//!
//! Materializes concrete dated shift instances from a weekly template set
//! over a date range, annotates them against already-persisted shifts, and
//! shapes confirmed instances into insertable rows. The expansion and
//! conflict steps are pure; the service wraps them with template and shift
//! retrieval.

use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use tracing::{debug, info};

use crate::domain::error::ValidationError;
use crate::domain::models::rota::{ConflictDetail, ConflictKind, ShiftInstance};
use crate::domain::models::shift::{NewShift, Shift, ShiftStatus};
use crate::domain::models::template::ShiftTemplate;
use crate::storage::{ShiftRepository, TemplateRepository};

#[derive(Clone)]
pub struct RotaService {
    template_repository: TemplateRepository,
    shift_repository: ShiftRepository,
}

/// Candidate instances plus the snapshot of existing shifts they were
/// checked against
#[derive(Debug, Clone)]
pub struct ExpansionOutcome {
    pub instances: Vec<ShiftInstance>,
    pub existing: Vec<Shift>,
}

impl RotaService {
    pub fn new(template_repository: TemplateRepository, shift_repository: ShiftRepository) -> Self {
        Self {
            template_repository,
            shift_repository,
        }
    }

    /// Fetch the template set, expand it over the requested range and
    /// annotate the result against existing shifts at the same location.
    pub async fn generate_candidates(
        &self,
        location_id: &str,
        version: i64,
        start_date: NaiveDate,
        weeks: u32,
    ) -> Result<ExpansionOutcome> {
        let templates = self
            .template_repository
            .list_templates_for_set(location_id, version)
            .await?;

        if templates.is_empty() {
            return Err(ValidationError::EmptyTemplateSet {
                location_id: location_id.to_string(),
                version,
            }
            .into());
        }

        let instances = Self::expand(&templates, start_date, weeks)?;

        // Existing shifts are only relevant inside the expanded range: the
        // last possible instance lands 7*weeks - 1 days after the anchor.
        let range_end = start_date + Duration::days(7 * weeks as i64 - 1);
        let existing = self
            .shift_repository
            .list_shifts(Some(location_id), Some(start_date), Some(range_end))
            .await?;

        let instances = Self::detect_conflicts(instances, &existing);
        let conflict_count = instances.iter().filter(|i| i.has_conflict).count();

        info!(
            "Expanded {} templates over {} weeks from {}: {} instances, {} with conflicts",
            templates.len(),
            weeks,
            start_date,
            instances.len(),
            conflict_count
        );

        Ok(ExpansionOutcome { instances, existing })
    }

    /// Expand a template set into dated instances.
    ///
    /// Output length is exactly `weeks * templates.len()`; ordering is
    /// week-major, template-order-minor. The instance's day of week is
    /// derived from the computed date, which by construction equals the
    /// template's configured day.
    pub fn expand(
        templates: &[ShiftTemplate],
        start_date: NaiveDate,
        weeks: u32,
    ) -> Result<Vec<ShiftInstance>, ValidationError> {
        if templates.is_empty() {
            return Err(ValidationError::NoTemplates);
        }
        if weeks < 1 {
            return Err(ValidationError::ZeroWeeks);
        }

        let location_id = &templates[0].location_id;
        let version = templates[0].version;
        if templates
            .iter()
            .any(|t| &t.location_id != location_id || t.version != version)
        {
            return Err(ValidationError::MixedTemplateSet);
        }

        for template in templates {
            if !shared::is_valid_day_of_week(template.day_of_week) {
                return Err(ValidationError::InvalidDayOfWeek(template.day_of_week));
            }
        }

        let start_weekday = start_date.weekday().num_days_from_sunday();
        let mut instances = Vec::with_capacity(templates.len() * weeks as usize);

        for week in 0..weeks {
            for template in templates {
                // First occurrence of the template's weekday on or after the
                // anchor, shifted by whole weeks
                let days_to_add =
                    (template.day_of_week as i64 - start_weekday as i64 + 7).rem_euclid(7);
                let date = start_date + Duration::days(7 * week as i64 + days_to_add);

                let day_of_week = date.weekday().num_days_from_sunday() as u8;
                debug_assert_eq!(day_of_week, template.day_of_week);

                debug!(
                    "week {} template {} -> {} ({})",
                    week,
                    template.id,
                    date,
                    shared::day_name(day_of_week)
                );

                instances.push(ShiftInstance {
                    date,
                    day_of_week,
                    start_time: template.start_time,
                    end_time: template.end_time,
                    location_id: template.location_id.clone(),
                    employee_id: template.employee_id.clone(),
                    has_conflict: false,
                    conflict_details: Vec::new(),
                });
            }
        }

        Ok(instances)
    }

    /// Annotate candidates with conflicts against existing shifts.
    ///
    /// A conflict requires the same calendar date, the same non-null
    /// employee on both sides, and overlapping minute-of-day ranges. The
    /// classification is informational; nothing here blocks saving.
    pub fn detect_conflicts(
        mut candidates: Vec<ShiftInstance>,
        existing: &[Shift],
    ) -> Vec<ShiftInstance> {
        for candidate in &mut candidates {
            candidate.clear_conflicts();

            let Some(employee_id) = candidate.employee_id.as_deref() else {
                continue;
            };

            for shift in existing {
                if shift.date != candidate.date {
                    continue;
                }
                if shift.employee_id.as_deref() != Some(employee_id) {
                    continue;
                }

                let new_start = candidate.start_minute();
                let new_end = candidate.end_minute();
                let existing_start = shift.start_minute();
                let existing_end = shift.end_minute();

                // Inclusive overlap test on minute-of-day ranges
                if new_start <= existing_end && new_end >= existing_start {
                    let kind = classify_overlap(new_start, new_end, existing_start, existing_end);
                    candidate.has_conflict = true;
                    candidate.conflict_details.push(ConflictDetail {
                        kind,
                        existing_shift: shift.clone(),
                    });
                }
            }
        }

        candidates
    }

    /// Shape instances into the minimal persisted-shift rows.
    pub fn format_for_persistence(instances: &[ShiftInstance]) -> Vec<NewShift> {
        instances
            .iter()
            .map(|instance| NewShift {
                date: instance.date,
                start_time: instance.start_time,
                end_time: instance.end_time,
                location_id: instance.location_id.clone(),
                employee_id: instance.employee_id.clone(),
                name: format!(
                    "{} {}-{}",
                    shared::day_name(instance.day_of_week),
                    instance.start_time.format("%H:%M"),
                    instance.end_time.format("%H:%M")
                ),
                status: ShiftStatus::Scheduled,
            })
            .collect()
    }
}

/// Classify an already-established overlap between a candidate and an
/// existing shift
fn classify_overlap(new_start: u32, new_end: u32, existing_start: u32, existing_end: u32) -> ConflictKind {
    if new_start <= existing_start && new_end >= existing_end {
        ConflictKind::Complete
    } else if new_start >= existing_start && new_end <= existing_end {
        ConflictKind::Contained
    } else if new_start < existing_start {
        ConflictKind::PartialEnd
    } else {
        ConflictKind::PartialStart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};

    fn template(day_of_week: u8, start: (u32, u32), end: (u32, u32), employee: Option<&str>) -> ShiftTemplate {
        ShiftTemplate {
            id: ShiftTemplate::generate_id(day_of_week as u64),
            location_id: "location::1".to_string(),
            day_of_week,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            employee_id: employee.map(String::from),
            version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn existing_shift(date: &str, start: (u32, u32), end: (u32, u32), employee: Option<&str>) -> Shift {
        Shift {
            id: Shift::generate_id(1, 0),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            location_id: "location::1".to_string(),
            employee_id: employee.map(String::from),
            name: "existing".to_string(),
            status: ShiftStatus::Scheduled,
        }
    }

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_expand_length_invariant() {
        let templates = vec![
            template(1, (9, 0), (17, 0), Some("employee::1")),
            template(3, (12, 0), (20, 0), None),
            template(5, (8, 0), (16, 0), Some("employee::2")),
        ];

        for weeks in [1, 2, 4, 12, 26] {
            let instances =
                RotaService::expand(&templates, date("2024-06-05"), weeks).unwrap();
            assert_eq!(instances.len(), templates.len() * weeks as usize);
        }
    }

    #[test]
    fn test_expand_monday_template_from_wednesday() {
        // A Monday template with a Wednesday anchor over 2 weeks produces
        // the following Monday and the Monday after.
        let templates = vec![template(1, (9, 0), (17, 0), Some("employee::1"))];
        let start = date("2024-06-05"); // a Wednesday

        let instances = RotaService::expand(&templates, start, 2).unwrap();

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].date, date("2024-06-10"));
        assert_eq!(instances[1].date, date("2024-06-17"));
        for instance in &instances {
            assert_eq!(instance.day_of_week, 1);
            assert_eq!(instance.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
            assert_eq!(instance.end_time, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
            assert_eq!(instance.employee_id.as_deref(), Some("employee::1"));
        }
    }

    #[test]
    fn test_expand_anchor_on_matching_weekday_stays_in_week_zero() {
        // A Monday anchor with a Monday template keeps the anchor date itself
        let templates = vec![template(1, (9, 0), (17, 0), None)];
        let start = date("2024-06-03"); // a Monday

        let instances = RotaService::expand(&templates, start, 1).unwrap();
        assert_eq!(instances[0].date, start);
    }

    #[test]
    fn test_expand_day_of_week_derived_from_date() {
        let templates: Vec<ShiftTemplate> =
            (0..7).map(|d| template(d, (9, 0), (17, 0), None)).collect();

        let instances = RotaService::expand(&templates, date("2024-06-05"), 3).unwrap();

        for instance in &instances {
            assert_eq!(
                instance.day_of_week,
                instance.date.weekday().num_days_from_sunday() as u8
            );
        }
    }

    #[test]
    fn test_expand_ordering_is_week_major() {
        let templates = vec![
            template(5, (8, 0), (16, 0), None),
            template(1, (9, 0), (17, 0), None),
        ];

        let instances = RotaService::expand(&templates, date("2024-06-02"), 2).unwrap();

        // Template order within each week is preserved, not date-sorted
        assert_eq!(instances[0].day_of_week, 5);
        assert_eq!(instances[1].day_of_week, 1);
        assert_eq!(instances[2].day_of_week, 5);
        assert_eq!(instances[3].day_of_week, 1);
        assert!(instances[2].date > instances[0].date);
    }

    #[test]
    fn test_expand_is_idempotent() {
        let templates = vec![
            template(1, (9, 0), (17, 0), Some("employee::1")),
            template(4, (10, 0), (18, 0), None),
        ];

        let first = RotaService::expand(&templates, date("2024-06-05"), 4).unwrap();
        let second = RotaService::expand(&templates, date("2024-06-05"), 4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_expand_rejects_empty_and_zero_weeks() {
        let templates = vec![template(1, (9, 0), (17, 0), None)];

        assert!(RotaService::expand(&[], date("2024-06-05"), 1).is_err());
        assert_eq!(
            RotaService::expand(&templates, date("2024-06-05"), 0).unwrap_err(),
            ValidationError::ZeroWeeks
        );
    }

    #[test]
    fn test_expand_rejects_mixed_template_set() {
        let mut other = template(2, (9, 0), (17, 0), None);
        other.version = 2;
        let templates = vec![template(1, (9, 0), (17, 0), None), other];

        assert_eq!(
            RotaService::expand(&templates, date("2024-06-05"), 1).unwrap_err(),
            ValidationError::MixedTemplateSet
        );
    }

    #[test]
    fn test_expand_rejects_invalid_day_of_week() {
        let mut bad = template(1, (9, 0), (17, 0), None);
        bad.day_of_week = 7;

        assert_eq!(
            RotaService::expand(&[bad], date("2024-06-05"), 1).unwrap_err(),
            ValidationError::InvalidDayOfWeek(7)
        );
    }

    #[test]
    fn test_conflict_contained_classification() {
        // Existing 09:00-17:00 on 2024-06-03, candidate 12:00-13:00 with
        // the same employee and date -> contained.
        let templates = vec![template(1, (12, 0), (13, 0), Some("employee::1"))];
        let candidates = RotaService::expand(&templates, date("2024-06-03"), 1).unwrap();
        let existing = vec![existing_shift("2024-06-03", (9, 0), (17, 0), Some("employee::1"))];

        let annotated = RotaService::detect_conflicts(candidates, &existing);

        assert!(annotated[0].has_conflict);
        assert_eq!(annotated[0].conflict_details.len(), 1);
        assert_eq!(annotated[0].conflict_details[0].kind, ConflictKind::Contained);
    }

    #[test]
    fn test_conflict_all_classifications() {
        let existing = vec![existing_shift("2024-06-03", (9, 0), (17, 0), Some("employee::1"))];

        let cases = [
            ((8, 0), (18, 0), ConflictKind::Complete),
            ((10, 0), (16, 0), ConflictKind::Contained),
            ((7, 0), (10, 0), ConflictKind::PartialEnd),
            ((16, 0), (20, 0), ConflictKind::PartialStart),
        ];

        for (start, end, expected) in cases {
            let templates = vec![template(1, start, end, Some("employee::1"))];
            let candidates = RotaService::expand(&templates, date("2024-06-03"), 1).unwrap();
            let annotated = RotaService::detect_conflicts(candidates, &existing);

            assert!(annotated[0].has_conflict);
            assert_eq!(
                annotated[0].conflict_details[0].kind, expected,
                "candidate {:?}-{:?}",
                start, end
            );
        }
    }

    #[test]
    fn test_conflict_requires_matching_date_and_employee() {
        let templates = vec![template(1, (9, 0), (17, 0), Some("employee::1"))];
        let candidates = RotaService::expand(&templates, date("2024-06-03"), 1).unwrap();

        // Same times, wrong date
        let wrong_date = vec![existing_shift("2024-06-10", (9, 0), (17, 0), Some("employee::1"))];
        assert!(!RotaService::detect_conflicts(candidates.clone(), &wrong_date)[0].has_conflict);

        // Same date and times, different employee
        let wrong_employee = vec![existing_shift("2024-06-03", (9, 0), (17, 0), Some("employee::2"))];
        assert!(!RotaService::detect_conflicts(candidates, &wrong_employee)[0].has_conflict);
    }

    #[test]
    fn test_unassigned_candidate_never_conflicts() {
        let templates = vec![template(1, (9, 0), (17, 0), None)];
        let candidates = RotaService::expand(&templates, date("2024-06-03"), 1).unwrap();

        let existing = vec![
            existing_shift("2024-06-03", (9, 0), (17, 0), Some("employee::1")),
            existing_shift("2024-06-03", (9, 0), (17, 0), None),
        ];

        let annotated = RotaService::detect_conflicts(candidates, &existing);
        assert!(!annotated[0].has_conflict);
        assert!(annotated[0].conflict_details.is_empty());
    }

    #[test]
    fn test_unassigned_existing_shift_never_conflicts() {
        let templates = vec![template(1, (9, 0), (17, 0), Some("employee::1"))];
        let candidates = RotaService::expand(&templates, date("2024-06-03"), 1).unwrap();

        let existing = vec![existing_shift("2024-06-03", (9, 0), (17, 0), None)];
        assert!(!RotaService::detect_conflicts(candidates, &existing)[0].has_conflict);
    }

    #[test]
    fn test_conflict_boundary_touch_is_inclusive() {
        // Candidate ends exactly when the existing shift starts; the
        // inclusive comparison flags it
        let templates = vec![template(1, (7, 0), (9, 0), Some("employee::1"))];
        let candidates = RotaService::expand(&templates, date("2024-06-03"), 1).unwrap();
        let existing = vec![existing_shift("2024-06-03", (9, 0), (17, 0), Some("employee::1"))];

        let annotated = RotaService::detect_conflicts(candidates, &existing);
        assert!(annotated[0].has_conflict);
        assert_eq!(annotated[0].conflict_details[0].kind, ConflictKind::PartialEnd);
    }

    #[test]
    fn test_conflict_symmetry_with_naive_interval_check() {
        let templates = vec![
            template(1, (8, 0), (12, 0), Some("employee::1")),
            template(1, (13, 0), (18, 0), Some("employee::1")),
        ];
        let candidates = RotaService::expand(&templates, date("2024-06-03"), 2).unwrap();
        let existing = vec![
            existing_shift("2024-06-03", (9, 0), (17, 0), Some("employee::1")),
            existing_shift("2024-06-10", (11, 0), (14, 0), Some("employee::1")),
        ];

        let annotated = RotaService::detect_conflicts(candidates, &existing);

        for candidate in &annotated {
            for detail in &candidate.conflict_details {
                let shift = &detail.existing_shift;
                assert_eq!(shift.date, candidate.date);
                assert_eq!(shift.employee_id, candidate.employee_id);
                // Independent naive interval check must confirm the overlap
                assert!(
                    candidate.start_minute() <= shift.end_minute()
                        && candidate.end_minute() >= shift.start_minute()
                );
            }
        }
    }

    #[test]
    fn test_detect_conflicts_resets_previous_annotations() {
        let templates = vec![template(1, (9, 0), (17, 0), Some("employee::1"))];
        let candidates = RotaService::expand(&templates, date("2024-06-03"), 1).unwrap();

        let existing = vec![existing_shift("2024-06-03", (9, 0), (17, 0), Some("employee::1"))];
        let annotated = RotaService::detect_conflicts(candidates, &existing);
        assert!(annotated[0].has_conflict);

        // Re-running against an empty set clears stale annotations
        let cleared = RotaService::detect_conflicts(annotated, &[]);
        assert!(!cleared[0].has_conflict);
        assert!(cleared[0].conflict_details.is_empty());
    }

    #[test]
    fn test_format_for_persistence() {
        let templates = vec![template(1, (9, 0), (17, 0), Some("employee::1"))];
        let instances = RotaService::expand(&templates, date("2024-06-03"), 1).unwrap();

        let rows = RotaService::format_for_persistence(&instances);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, date("2024-06-03"));
        assert_eq!(rows[0].name, "Monday 09:00-17:00");
        assert_eq!(rows[0].status, ShiftStatus::Scheduled);
        assert_eq!(rows[0].employee_id.as_deref(), Some("employee::1"));
    }

    #[tokio::test]
    async fn test_generate_candidates_requires_templates() {
        let db = crate::db::DbConnection::init_test().await.unwrap();
        let service = RotaService::new(
            TemplateRepository::new(db.clone()),
            ShiftRepository::new(db),
        );

        let err = service
            .generate_candidates("location::1", 1, date("2024-06-03"), 2)
            .await
            .unwrap_err();

        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(
            *validation,
            ValidationError::EmptyTemplateSet {
                location_id: "location::1".to_string(),
                version: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_generate_candidates_annotates_against_stored_shifts() {
        let db = crate::db::DbConnection::init_test().await.unwrap();
        let template_repo = TemplateRepository::new(db.clone());
        let shift_repo = ShiftRepository::new(db);

        template_repo
            .store_template(&template(1, (12, 0), (13, 0), Some("employee::1")))
            .await
            .unwrap();

        let existing = RotaService::format_for_persistence(
            &RotaService::expand(
                &[template(1, (9, 0), (17, 0), Some("employee::1"))],
                date("2024-06-03"),
                1,
            )
            .unwrap(),
        );
        shift_repo.create_shifts(&existing).await.unwrap();

        let service = RotaService::new(template_repo, shift_repo);
        let outcome = service
            .generate_candidates("location::1", 1, date("2024-06-03"), 1)
            .await
            .unwrap();

        assert_eq!(outcome.instances.len(), 1);
        assert!(outcome.instances[0].has_conflict);
        assert_eq!(
            outcome.instances[0].conflict_details[0].kind,
            ConflictKind::Contained
        );
        assert_eq!(outcome.existing.len(), 1);
    }
}
