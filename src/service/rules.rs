//! Cross-entity rules that gate interview scheduling. Pure; callers fetch the inputs.

use crate::error::RuleViolation;
use chrono::{Datelike, NaiveDate};

pub const MINIMUM_AGE: i32 = 18;

/// Whole years from `birthday` to `today`. The current year counts only once the
/// birthday's month and day have been reached.
pub fn age_on(today: NaiveDate, birthday: NaiveDate) -> i32 {
    let mut age = today.year() - birthday.year();
    if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
        age -= 1;
    }
    age
}

/// Age first, then position match. Positions compare byte-for-byte.
pub fn validate_interview_subject(
    today: NaiveDate,
    birthday: NaiveDate,
    resume_positions: &[String],
    vacancy_position: &str,
) -> Result<(), RuleViolation> {
    let age = age_on(today, birthday);
    if age < MINIMUM_AGE {
        return Err(RuleViolation::Underage {
            age,
            minimum: MINIMUM_AGE,
        });
    }
    if !resume_positions.iter().any(|p| p == vacancy_position) {
        return Err(RuleViolation::PositionMismatch {
            vacancy_position: vacancy_position.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn positions(ps: &[&str]) -> Vec<String> {
        ps.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn eighteenth_birthday_today_is_eligible() {
        let today = date(2024, 5, 21);
        assert_eq!(age_on(today, date(2006, 5, 21)), 18);
        assert!(validate_interview_subject(
            today,
            date(2006, 5, 21),
            &positions(&["Backend Engineer"]),
            "Backend Engineer"
        )
        .is_ok());
    }

    #[test]
    fn day_before_eighteenth_birthday_is_underage() {
        let today = date(2024, 5, 21);
        assert_eq!(age_on(today, date(2006, 5, 22)), 17);
        assert_eq!(
            validate_interview_subject(
                today,
                date(2006, 5, 22),
                &positions(&["Backend Engineer"]),
                "Backend Engineer"
            ),
            Err(RuleViolation::Underage {
                age: 17,
                minimum: 18
            })
        );
    }

    #[test]
    fn leap_day_birthday() {
        assert_eq!(age_on(date(2024, 2, 28), date(2000, 2, 29)), 23);
        assert_eq!(age_on(date(2024, 2, 29), date(2000, 2, 29)), 24);
        assert_eq!(age_on(date(2023, 3, 1), date(2000, 2, 29)), 23);
    }

    #[test]
    fn underage_wins_over_mismatch() {
        let err = validate_interview_subject(date(2024, 1, 1), date(2010, 1, 1), &[], "Designer")
            .unwrap_err();
        assert!(matches!(err, RuleViolation::Underage { .. }));
    }

    #[test]
    fn position_must_match_exactly() {
        let today = date(2024, 5, 21);
        let adult = date(1990, 1, 1);
        for near_miss in ["backend engineer", "Backend Engineer ", " Backend Engineer"] {
            assert_eq!(
                validate_interview_subject(today, adult, &positions(&[near_miss]), "Backend Engineer"),
                Err(RuleViolation::PositionMismatch {
                    vacancy_position: "Backend Engineer".into()
                })
            );
        }
    }

    #[test]
    fn any_matching_resume_is_enough() {
        let ok = validate_interview_subject(
            date(2024, 5, 21),
            date(1990, 1, 1),
            &positions(&["QA", "Backend Engineer"]),
            "Backend Engineer",
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn no_resumes_is_a_mismatch() {
        let err =
            validate_interview_subject(date(2024, 5, 21), date(1990, 1, 1), &[], "QA").unwrap_err();
        assert!(matches!(err, RuleViolation::PositionMismatch { .. }));
    }
}
