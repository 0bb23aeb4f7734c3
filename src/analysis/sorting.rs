//! Stable multi-key ordering within each classification bucket. Equal
//! keys preserve input order, which keeps re-runs byte-identical.

use crate::analysis::AnalyzedPath;

/// Golden paths: most valuable first, ties broken by confidence, then by
/// the lowest-risk path.
pub fn sort_golden(paths: &mut [AnalyzedPath]) {
    paths.sort_by(|a, b| {
        golden_key(b)
            .total_cmp(&golden_key(a))
            .then_with(|| b.confidence.total_cmp(&a.confidence))
            .then_with(|| a.risk.total.total_cmp(&b.risk.total))
    });
}

/// Risk paths: most dangerous first; among equals the more valuable path
/// is reviewed first, then the better-evidenced one.
pub fn sort_risk(paths: &mut [AnalyzedPath]) {
    paths.sort_by(|a, b| {
        risk_key(b)
            .total_cmp(&risk_key(a))
            .then_with(|| b.intent.business.total.total_cmp(&a.intent.business.total))
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });
}

/// Neutral paths: net value (intent minus risk) first.
pub fn sort_neutral(paths: &mut [AnalyzedPath]) {
    paths.sort_by(|a, b| {
        neutral_key(b)
            .total_cmp(&neutral_key(a))
            .then_with(|| b.intent.business.total.total_cmp(&a.intent.business.total))
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });
}

fn golden_key(p: &AnalyzedPath) -> f64 {
    0.4 * p.intent.business.total + 0.3 * p.intent.completeness.total + 0.3 * p.intent.quality.total
}

fn risk_key(p: &AnalyzedPath) -> f64 {
    0.4 * p.risk.architectural.total + 0.3 * p.risk.blast_radius + 0.3 * p.risk.change_complexity
}

fn neutral_key(p: &AnalyzedPath) -> f64 {
    p.intent.total - p.risk.total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::analyzed_path;

    #[test]
    fn test_golden_sort_by_composite_then_confidence() {
        let mut paths = vec![
            analyzed_path("low", |p| {
                p.intent.business.total = 0.5;
                p.confidence = 0.9;
            }),
            analyzed_path("high", |p| {
                p.intent.business.total = 0.9;
                p.confidence = 0.1;
            }),
        ];
        sort_golden(&mut paths);
        assert_eq!(paths[0].path.id, "high");
    }

    #[test]
    fn test_golden_tie_broken_by_confidence() {
        let mut paths = vec![
            analyzed_path("hesitant", |p| p.confidence = 0.4),
            analyzed_path("confident", |p| p.confidence = 0.9),
        ];
        sort_golden(&mut paths);
        assert_eq!(paths[0].path.id, "confident");
    }

    #[test]
    fn test_golden_final_tie_prefers_lower_risk() {
        let mut paths = vec![
            analyzed_path("risky", |p| p.risk.total = 0.3),
            analyzed_path("safe", |p| p.risk.total = 0.1),
        ];
        sort_golden(&mut paths);
        assert_eq!(paths[0].path.id, "safe");
    }

    #[test]
    fn test_risk_sort_prefers_valuable_among_equals() {
        let mut paths = vec![
            analyzed_path("plumbing", |p| {
                p.risk.architectural.total = 0.8;
                p.intent.business.total = 0.2;
            }),
            analyzed_path("valuable", |p| {
                p.risk.architectural.total = 0.8;
                p.intent.business.total = 0.9;
            }),
        ];
        sort_risk(&mut paths);
        assert_eq!(paths[0].path.id, "valuable");
    }

    #[test]
    fn test_neutral_sort_by_net_value() {
        let mut paths = vec![
            analyzed_path("wash", |p| {
                p.intent.total = 0.5;
                p.risk.total = 0.5;
            }),
            analyzed_path("net_positive", |p| {
                p.intent.total = 0.6;
                p.risk.total = 0.2;
            }),
        ];
        sort_neutral(&mut paths);
        assert_eq!(paths[0].path.id, "net_positive");
    }

    #[test]
    fn test_sort_is_stable_for_identical_keys() {
        let mut paths = vec![
            analyzed_path("first", |_| {}),
            analyzed_path("second", |_| {}),
        ];
        sort_golden(&mut paths);
        assert_eq!(paths[0].path.id, "first");
        assert_eq!(paths[1].path.id, "second");
    }
}
