//! Structural signals detected directly from a path's shape, independent
//! of the numeric scores. The classifier combines these with thresholds.

use crate::core::BlockType;
use crate::graph::types::{CallPath, MethodNode};
use crate::intent::lexicon;
use crate::risk::HIGH_IN_DEGREE_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSignals {
    /// The path enters through a controller that the change touched.
    pub new_endpoint: bool,
    /// The path runs through a business-central entity.
    pub core_business_entity: bool,
    /// The change touches the data model (entity, DTO, or repository).
    pub data_model_change: bool,
    pub transactional_operation: bool,
    pub external_api_call: bool,
    pub database_operation: bool,
}

pub fn detect(path: &CallPath, changed: &HashSet<String>) -> PathSignals {
    let new_endpoint = path
        .methods
        .first()
        .is_some_and(|m| m.block_type.is_entry_layer() && changed.contains(&m.id));

    let core_business_entity = path.methods.iter().any(|m| {
        m.block_type == BlockType::Entity
            && (lexicon::has_business_verb(&m.method_name)
                || lexicon::has_business_verb(m.class_id())
                || m.in_degree > HIGH_IN_DEGREE_THRESHOLD)
    });

    let data_model_change = path.methods.iter().any(|m| {
        changed.contains(&m.id)
            && matches!(
                m.block_type,
                BlockType::Entity | BlockType::Dto | BlockType::Vo | BlockType::Repository
            )
    });

    let transactional_operation = path
        .methods
        .iter()
        .any(|m| m.has_annotation_containing("transactional"));

    let external_api_call = path.methods.iter().any(calls_external_api);

    let database_operation = path.methods.iter().any(|m| {
        m.block_type.is_data_access()
            || ["query", "insert", "persist"]
                .iter()
                .any(|prefix| m.method_name.starts_with(prefix))
    });

    PathSignals {
        new_endpoint,
        core_business_entity,
        data_model_change,
        transactional_operation,
        external_api_call,
        database_operation,
    }
}

fn calls_external_api(method: &MethodNode) -> bool {
    let annotated = ["client", "http", "rest", "feign"]
        .iter()
        .any(|needle| method.has_annotation_containing(needle));
    let name = method.method_name.to_lowercase();
    annotated || ["http", "api", "client", "remote"].iter().any(|n| name.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(id: &str, block: BlockType) -> MethodNode {
        MethodNode::new(id, id.split('#').nth(1).unwrap_or(id).trim_end_matches("()"), block)
    }

    fn changed(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_endpoint_requires_changed_controller_head() {
        let path = CallPath::new(
            "p",
            vec![
                method("C#submitOrder()", BlockType::Controller),
                method("S#process()", BlockType::Service),
            ],
        );
        assert!(detect(&path, &changed(&["C#submitOrder()"])).new_endpoint);
        assert!(!detect(&path, &changed(&[])).new_endpoint);
        // A changed controller mid-path is not an endpoint signal.
        let tail_controller = CallPath::new(
            "p",
            vec![
                method("S#process()", BlockType::Service),
                method("C#submitOrder()", BlockType::Controller),
            ],
        );
        assert!(!detect(&tail_controller, &changed(&["C#submitOrder()"])).new_endpoint);
    }

    #[test]
    fn test_core_entity_signal() {
        let path = CallPath::new("p", vec![method("Order#applyPayment()", BlockType::Entity)]);
        assert!(detect(&path, &changed(&[])).core_business_entity);

        let dull = CallPath::new("p", vec![method("Widget#spin()", BlockType::Entity)]);
        assert!(!detect(&dull, &changed(&[])).core_business_entity);
    }

    #[test]
    fn test_data_model_change_signal() {
        let path = CallPath::new("p", vec![method("OrderDto#normalize()", BlockType::Dto)]);
        assert!(detect(&path, &changed(&["OrderDto#normalize()"])).data_model_change);
        assert!(!detect(&path, &changed(&[])).data_model_change);
    }

    #[test]
    fn test_transactional_and_database_signals() {
        let mut repo = method("R#findAll()", BlockType::Repository);
        repo.annotations.insert("@Transactional".to_string());
        let path = CallPath::new("p", vec![repo]);

        let signals = detect(&path, &changed(&[]));
        assert!(signals.transactional_operation);
        assert!(signals.database_operation);
    }

    #[test]
    fn test_external_api_signal() {
        let mut m = method("S#fetchQuote()", BlockType::Service);
        m.annotations.insert("@FeignClient".to_string());
        assert!(detect(&CallPath::new("p", vec![m]), &changed(&[])).external_api_call);

        let named = method("S#callPaymentApi()", BlockType::Service);
        assert!(detect(&CallPath::new("p", vec![named]), &changed(&[])).external_api_call);
    }
}
