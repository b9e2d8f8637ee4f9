use chrono::{DateTime, NaiveDateTime, Utc};

/// Freshness score for a video uploaded at `created_at`, evaluated at `now`.
///
/// `weight = 1 / (1 + age_days)`, where age is the whole-day difference
/// clamped to zero (future timestamps count as brand new). The score is in
/// (0,1] for any parseable timestamp and decays monotonically with age.
///
/// Absent or malformed timestamps are a data-quality condition, not an
/// error: they earn exactly 0.0, so such videos compete on similarity
/// alone. Timestamps without an explicit offset are assumed UTC.
///
/// Batch callers should evaluate every candidate against one shared `now`
/// so an entire run is scored at a single instant.
pub fn recency_weight(created_at: Option<&str>, now: DateTime<Utc>) -> f64 {
    let Some(parsed) = created_at.and_then(parse_timestamp) else {
        return 0.0;
    };

    let age_days = (now - parsed).num_days().max(0);
    1.0 / (1.0 + age_days as f64)
}

/// Convenience wrapper evaluating at the current instant
pub fn recency_weight_now(created_at: Option<&str>) -> f64 {
    recency_weight(created_at, Utc::now())
}

/// Accepts RFC 3339 (with `Z` or a numeric offset) and bare ISO-8601
/// date-times, which are taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    raw.parse::<NaiveDateTime>()
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_fresh_upload_scores_one() {
        let weight = recency_weight(Some("2025-06-15T12:00:00Z"), fixed_now());
        assert_eq!(weight, 1.0);
    }

    #[test]
    fn test_day_old_upload() {
        let weight = recency_weight(Some("2025-06-14T12:00:00Z"), fixed_now());
        assert_eq!(weight, 0.5);
    }

    #[test]
    fn test_nine_days_old() {
        let weight = recency_weight(Some("2025-06-06T12:00:00Z"), fixed_now());
        assert_eq!(weight, 0.1);
    }

    #[test]
    fn test_future_timestamp_counts_as_new() {
        let weight = recency_weight(Some("2025-07-01T00:00:00Z"), fixed_now());
        assert_eq!(weight, 1.0);
    }

    #[test]
    fn test_naive_timestamp_assumed_utc() {
        let with_offset = recency_weight(Some("2025-06-10T12:00:00Z"), fixed_now());
        let naive = recency_weight(Some("2025-06-10T12:00:00"), fixed_now());
        assert_eq!(with_offset, naive);
    }

    #[test]
    fn test_explicit_offset_honored() {
        // 2025-06-14T22:00:00-06:00 is 2025-06-15T04:00:00Z, under a day old
        let weight = recency_weight(Some("2025-06-14T22:00:00-06:00"), fixed_now());
        assert_eq!(weight, 1.0);
    }

    #[test]
    fn test_malformed_timestamp_scores_exactly_zero() {
        assert_eq!(recency_weight(Some("not a date"), fixed_now()), 0.0);
        assert_eq!(recency_weight(Some("2025-13-45"), fixed_now()), 0.0);
        assert_eq!(recency_weight(Some(""), fixed_now()), 0.0);
    }

    #[test]
    fn test_absent_timestamp_scores_exactly_zero() {
        assert_eq!(recency_weight(None, fixed_now()), 0.0);
    }

    #[test]
    fn test_monotonically_non_increasing_with_age() {
        let now = fixed_now();
        let mut previous = f64::INFINITY;
        for days in 0..400 {
            let stamp = (now - Duration::days(days)).to_rfc3339();
            let weight = recency_weight(Some(&stamp), now);
            assert!(weight <= previous);
            assert!(weight > 0.0 && weight <= 1.0);
            previous = weight;
        }
    }
}
