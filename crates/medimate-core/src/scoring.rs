//! Scoring primitives: duration bands, per-condition probability, and the
//! aggregate confidence figure.
//!
//! Everything here is a pure function of its arguments and the catalog's
//! `ScoringPolicy`. No randomness, no clock.

use medimate_catalog::ScoringPolicy;
use medimate_contracts::assessment::{AssessmentInput, MatchedCondition};

// ── Duration bands ────────────────────────────────────────────────────────────

/// Coarse classification of the free-form duration string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBand {
    Hours,
    Days,
    Weeks,
    Months,
    Unknown,
}

impl DurationBand {
    /// Classify a duration such as "3 days", "less-than-a-day" or "2 weeks".
    ///
    /// Separators (`-`, `_`) are treated as spaces; matching is by keyword and
    /// case-insensitive. Anything unrecognized is `Unknown`.
    pub fn classify(duration: Option<&str>) -> Self {
        let Some(raw) = duration else {
            return DurationBand::Unknown;
        };
        let text = raw.trim().to_lowercase().replace(['-', '_'], " ");

        if text.is_empty() {
            DurationBand::Unknown
        } else if text.contains("hour")
            || text.contains("today")
            || text.contains("less than a day")
            || text.contains("less than day")
        {
            DurationBand::Hours
        } else if text.contains("month") || text.contains("year") {
            DurationBand::Months
        } else if text.contains("week") {
            DurationBand::Weeks
        } else if text.contains("day") {
            DurationBand::Days
        } else {
            DurationBand::Unknown
        }
    }
}

// ── Probability ───────────────────────────────────────────────────────────────

/// Probability that a condition explains the selected symptoms.
///
/// `matched / total * 100`, plus `severity_bonus` when the mean severity of
/// the matched symptoms reaches `high_severity_average`, minus
/// `short_duration_penalty` for an hours-long duration. Clamped to [0, 100]
/// and rounded.
///
/// `total` must be non-zero; the catalog rejects conditions without symptoms.
pub fn condition_probability(
    matched: usize,
    total: usize,
    mean_severity: f64,
    band: DurationBand,
    policy: &ScoringPolicy,
) -> u8 {
    if matched == 0 || total == 0 {
        return 0;
    }

    let mut score = matched as f64 / total as f64 * 100.0;
    if mean_severity >= policy.high_severity_average {
        score += f64::from(policy.severity_bonus);
    }
    if band == DurationBand::Hours {
        score -= f64::from(policy.short_duration_penalty);
    }

    score.clamp(0.0, 100.0).round() as u8
}

// ── Confidence ────────────────────────────────────────────────────────────────

/// Fraction of the optional context the caller supplied: duration, age
/// group, gender, and an explicit severity for every selected symptom.
pub fn input_completeness(input: &AssessmentInput) -> f64 {
    let provided = |field: &Option<String>| {
        field.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false)
    };

    let all_rated = !input.symptoms.is_empty()
        && input.symptoms.iter().all(|id| input.severities.contains_key(id));

    let supplied = [
        provided(&input.duration),
        provided(&input.age_group),
        provided(&input.gender),
        all_rated,
    ];
    supplied.iter().filter(|&&b| b).count() as f64 / supplied.len() as f64
}

/// Aggregate confidence for a ranked differential.
///
/// With no matches this is exactly `min_confidence`. Otherwise it rises with
/// the top probability, the gap between the top two entries, input
/// completeness, and symptom breadth (saturating at five symptoms), and stays
/// within [`min_confidence`, 100].
pub fn confidence(
    ranked: &[MatchedCondition],
    completeness: f64,
    selected: usize,
    policy: &ScoringPolicy,
) -> u8 {
    let floor = f64::from(policy.min_confidence);
    let Some(top) = ranked.first() else {
        return policy.min_confidence;
    };

    let top_p = f64::from(top.probability);
    let separation = match ranked.get(1) {
        Some(runner_up) => top_p - f64::from(runner_up.probability),
        None => top_p,
    };
    let breadth = selected.min(5) as f64 / 5.0;

    let score = floor + 0.25 * top_p + 0.15 * separation + 10.0 * completeness + 5.0 * breadth;
    score.clamp(floor, 100.0).round() as u8
}

// ── Tests ─────────────────────────────────────────────────────────────────────
