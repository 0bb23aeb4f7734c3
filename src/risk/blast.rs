//! Blast-radius and change-complexity scoring. Both look only at the
//! changed methods that actually lie on the path; a path untouched by the
//! change scores zero on both axes.

use crate::graph::types::{CallPath, MethodNode};
use std::collections::HashSet;

/// Upper bound of the raw impact proxy: a saturated popularity term
/// (~1.0 at nine callers) plus the 0.5-weighted structural term.
const IMPACT_PROXY_NORMALIZER: f64 = 1.5;

/// Impact proxy for one method: logarithmic caller popularity plus a
/// capped structural term from complexity and fan-out.
pub fn impact_proxy(method: &MethodNode) -> f64 {
    let popularity = ((method.in_degree + 1) as f64).ln() / 10f64.ln();
    let structural = (method.cyclomatic_complexity as f64 / 10.0
        + method.out_degree as f64 / 5.0)
        .min(1.0);
    popularity + 0.5 * structural
}

/// Average normalized impact proxy over the changed methods on the path.
pub fn blast_radius_score(path: &CallPath, changed: &HashSet<String>) -> f64 {
    let on_path = path.changed_methods(changed);
    if on_path.is_empty() {
        return 0.0;
    }
    let avg = on_path.iter().map(|m| impact_proxy(m)).sum::<f64>() / on_path.len() as f64;
    (avg / IMPACT_PROXY_NORMALIZER).clamp(0.0, 1.0)
}

/// Mean of four capped factors over the changed methods on the path:
/// cyclomatic complexity / 20, lines of code / 100, parameter count / 10,
/// and path length / 10.
pub fn change_complexity_score(path: &CallPath, changed: &HashSet<String>) -> f64 {
    let on_path = path.changed_methods(changed);
    if on_path.is_empty() {
        return 0.0;
    }

    let n = on_path.len() as f64;
    let avg_complexity = on_path
        .iter()
        .map(|m| m.cyclomatic_complexity as f64)
        .sum::<f64>()
        / n;
    let avg_loc = on_path.iter().map(|m| m.lines_of_code as f64).sum::<f64>() / n;
    let avg_params = on_path.iter().map(|m| m.param_types.len() as f64).sum::<f64>() / n;

    let factors = [
        (avg_complexity / 20.0).min(1.0),
        (avg_loc / 100.0).min(1.0),
        (avg_params / 10.0).min(1.0),
        (path.methods.len() as f64 / 10.0).min(1.0),
    ];
    factors.iter().sum::<f64>() / factors.len() as f64
}
