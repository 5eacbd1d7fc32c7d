use chrono::{Datelike, NaiveDate};

use crate::models::MAJORS;

/// Whole years between `birth_date` and `today`.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age.max(0)
}

/// Year groups are graduation years written as exactly four digits.
pub fn is_valid_year_group(year_group: &str) -> bool {
    year_group.len() == 4 && year_group.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_major(major: &str) -> bool {
    MAJORS.contains(&major)
}

pub fn validate_team_name(name: &str) -> bool {
    !name.trim().is_empty() && name.len() <= 50
}

pub fn validate_abbreviation(abbreviation: &str) -> bool {
    !abbreviation.trim().is_empty() && abbreviation.chars().count() <= 5
}

/// Convert a win/loss/draw record to a form string (e.g., "WLWDW"), most recent first.
/// Each entry is (result, match date, match id); the later-created match wins a same-day tie.
pub fn results_to_form(results: &[(char, NaiveDate, i64)]) -> String {
    let mut sorted_results = results.to_vec();
    sorted_results.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.2.cmp(&a.2)));

    sorted_results.iter().take(5).map(|(result, _, _)| *result).collect()
}

/// Share of the available points a team collected, as a percentage.
pub fn points_percentage(won: i64, drawn: i64, played: i64) -> f64 {
    if played <= 0 {
        return 0.0;
    }
    let points = won * 3 + drawn;
    (points as f64) / ((played * 3) as f64) * 100.0
}

/// Closest candidate to `query` by Jaro-Winkler similarity, ignoring case.
/// Returns None when nothing scores above `threshold`.
pub fn best_match<'a, T>(query: &str, candidates: &'a [T], name: impl Fn(&T) -> &str, threshold: f64) -> Option<&'a T> {
    let query = query.trim().to_lowercase();
    candidates
        .iter()
        .map(|c| (c, strsim::jaro_winkler(&query, &name(c).to_lowercase())))
        .filter(|(_, score)| *score >= threshold)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_on() {
        assert_eq!(age_on(date(2002, 5, 17), date(2024, 5, 16)), 21);
        assert_eq!(age_on(date(2002, 5, 17), date(2024, 5, 17)), 22);
        assert_eq!(age_on(date(2030, 1, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_year_group_and_major() {
        assert!(is_valid_year_group("2026"));
        assert!(!is_valid_year_group("26"));
        assert!(!is_valid_year_group("20a6"));
        assert!(is_valid_major("MIS"));
        assert!(!is_valid_major("Law"));
    }

    #[test]
    fn test_results_to_form() {
        let results = vec![
            ('W', date(2024, 9, 1), 1),
            ('L', date(2024, 9, 8), 2),
            ('D', date(2024, 9, 15), 3),
            ('W', date(2024, 9, 22), 4),
            ('W', date(2024, 9, 29), 5),
            ('L', date(2024, 10, 6), 6),
        ];
        assert_eq!(results_to_form(&results), "LWWDL");
    }

    #[test]
    fn same_day_results_order_by_match_id() {
        let day = date(2024, 9, 1);
        assert_eq!(results_to_form(&[('L', day, 3), ('W', day, 7), ('D', day, 5)]), "WDL");
        assert_eq!(results_to_form(&[('W', day, 7), ('D', day, 5), ('L', day, 3)]), "WDL");
    }

    #[test]
    fn test_points_percentage() {
        assert_eq!(points_percentage(0, 0, 0), 0.0);
        assert!((points_percentage(1, 1, 2) - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_best_match() {
        let names = vec!["Elite", "Legends United", "Highlanders", "Red Army"];
        assert_eq!(best_match("legends", &names, |n| *n, 0.8), Some(&"Legends United"));
        assert_eq!(best_match("red armu", &names, |n| *n, 0.8), Some(&"Red Army"));
        assert_eq!(best_match("zzzz", &names, |n| *n, 0.8), None);
    }
}
