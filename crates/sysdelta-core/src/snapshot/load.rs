//! JSON snapshot loading.
//!
//! On disk, modules are a list so that duplicate names can be reported
//! instead of silently collapsing into one map entry.

use crate::errors::{DeltaError, ExError};
use crate::model::{Analyzer, Feature, Issue, MetricThreshold, Module, SystemInfo};
use crate::snapshot::Snapshot;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Serialized form of a snapshot
#[derive(Debug, Deserialize)]
struct SnapshotDocument {
    system: SystemInfo,
    #[serde(default)]
    modules: Vec<Module>,
    #[serde(default)]
    issues: Vec<Issue>,
    #[serde(default)]
    features: Vec<Feature>,
    #[serde(default)]
    analyzers: Vec<Analyzer>,
    #[serde(default)]
    metric_thresholds: Vec<MetricThreshold>,
}

fn invalid(reason: impl Into<String>) -> ExError {
    ExError::from(DeltaError::InvalidSnapshot {
        reason: reason.into(),
    })
    .with_op("parse_snapshot_bytes")
}

/// Parse raw snapshot bytes into a [`Snapshot`].
///
/// # Errors
///
/// - `InvalidSnapshot`: bytes are not valid UTF-8, not valid JSON, the root is
///   not an object, `system` is absent, or a field does not match the schema
/// - `DuplicateEntity`: two modules share a name
pub fn parse_snapshot_bytes(bytes: &[u8]) -> Result<Snapshot, ExError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| invalid(format!("snapshot is not valid UTF-8: {}", e)))?;

    let raw: Value = serde_json::from_str(text)
        .map_err(|e| invalid(format!("snapshot is not valid JSON: {}", e)))?;

    let obj = raw
        .as_object()
        .ok_or_else(|| invalid("snapshot JSON root must be an object"))?;
    if !obj.contains_key("system") {
        return Err(invalid("required field `system` is absent"));
    }

    let document: SnapshotDocument = serde_json::from_value(raw)
        .map_err(|e| invalid(format!("failed to deserialize snapshot: {}", e)))?;

    let mut modules = BTreeMap::new();
    for module in document.modules {
        let name = module.name.clone();
        if modules.insert(name.clone(), module).is_some() {
            return Err(ExError::from(DeltaError::DuplicateModule { name })
                .with_op("parse_snapshot_bytes"));
        }
    }

    Ok(Snapshot {
        system: document.system,
        modules,
        issues: document.issues,
        features: document.features,
        analyzers: document.analyzers,
        metric_thresholds: document.metric_thresholds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "system": {
                "system_id": "sys-1",
                "name": "Shop",
                "timestamp": "2026-01-01T00:00:00Z"
            },
            "modules": [
                {"name": "core", "root_directories": [{"fq_name": "/shop/core/src", "presentation_name": "src"}]}
            ],
            "issues": [
                {
                    "variant": "single_element",
                    "key": "Todo",
                    "name": "TODO",
                    "element": {"fq_name": "pkg.Foo", "presentation_name": "Foo"},
                    "line": 10,
                    "column": 4,
                    "resolution": "FIXED"
                },
                {
                    "variant": "cycle_group",
                    "key": "CycleGroup",
                    "name": "Cycle 1",
                    "elements": [
                        {"fq_name": "pkg.A", "presentation_name": "A"},
                        {"fq_name": "pkg.B", "presentation_name": "B"}
                    ]
                }
            ],
            "metric_thresholds": [
                {"metric_id": "CoreLinesOfCode", "metric_level": "SourceFile", "lower_threshold": 0.0, "upper_threshold": 750.0}
            ]
        })
    }

    #[test]
    fn test_parse_valid_snapshot() {
        let bytes = serde_json::to_vec(&document()).unwrap();
        let snapshot = parse_snapshot_bytes(&bytes).unwrap();
        assert_eq!(snapshot.system.system_id, "sys-1");
        assert_eq!(snapshot.modules.len(), 1);
        assert_eq!(snapshot.issues.len(), 2);
        assert!(matches!(snapshot.issues[1], Issue::CycleGroup(_)));
        assert_eq!(snapshot.metric_thresholds.len(), 1);
        assert!(snapshot.features.is_empty());
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = parse_snapshot_bytes(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
        assert_eq!(err.op(), Some("parse_snapshot_bytes"));
    }

    #[test]
    fn test_non_object_root_rejected() {
        let err = parse_snapshot_bytes(b"[1, 2, 3]").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
        assert!(err.message().contains("root must be an object"));
    }

    #[test]
    fn test_missing_system_rejected() {
        let err = parse_snapshot_bytes(b"{\"modules\": []}").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
        assert!(err.message().contains("`system`"));
    }

    #[test]
    fn test_unknown_issue_variant_rejected() {
        let mut doc = document();
        doc["issues"][0]["variant"] = json!("architecture_violation");
        let bytes = serde_json::to_vec(&doc).unwrap();
        let err = parse_snapshot_bytes(&bytes).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
    }

    #[test]
    fn test_written_snapshot_loads_back() {
        use crate::model::{CycleGroupIssue, NamedElement, SingleElementIssue};
        use chrono::{TimeZone, Utc};

        let snapshot = Snapshot::new(SystemInfo::new(
            "run-1",
            "Shop",
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        ))
        .with_module(Module::new("core").with_root("/src"))
        .with_module(Module::new("web").with_root("/web/src"))
        .with_feature(Feature::new("Architecture", true))
        .with_metric_threshold(MetricThreshold::new("CoreLinesOfCode", "SourceFile", 0.0, 750.0))
        .with_issue(SingleElementIssue::new(
            "Todo",
            "TODO",
            NamedElement::new("pkg.Foo", "Foo"),
            3,
            1,
        ))
        .with_issue(CycleGroupIssue::new(
            "CycleGroup",
            "Cycle 1",
            vec![NamedElement::new("pkg.A", "A"), NamedElement::new("pkg.B", "B")],
        ));

        let bytes = serde_json::to_vec(&snapshot).unwrap();
        let loaded = parse_snapshot_bytes(&bytes).unwrap();

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let mut doc = document();
        doc["modules"] = json!([{"name": "core"}, {"name": "core"}]);
        let bytes = serde_json::to_vec(&doc).unwrap();
        let err = parse_snapshot_bytes(&bytes).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::DuplicateEntity);
        assert_eq!(err.entity_id(), Some("core"));
    }
}
