use chrono::{TimeZone, Utc};
use sysdelta_core::model::{
    CycleGroupIssue, DuplicateCodeBlockIssue, DuplicateCodeBlockOccurrence, MetricThreshold,
    NamedElement, SingleElementIssue, SystemInfo,
};
use sysdelta_core::Snapshot;

/// Create an empty snapshot for the given run id
#[allow(dead_code)]
pub fn snapshot(system_id: &str) -> Snapshot {
    let ts = Utc
        .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    Snapshot::new(SystemInfo::new(system_id, "Shop", ts))
}

/// Named element whose presentation name is the last dotted segment
#[allow(dead_code)]
pub fn element(fq_name: &str) -> NamedElement {
    let short = fq_name.rsplit('.').next().unwrap_or(fq_name);
    NamedElement::new(fq_name, short)
}

#[allow(dead_code)]
pub fn single(fq_name: &str, key: &str, line: i32, column: i32) -> SingleElementIssue {
    SingleElementIssue::new(key, key, element(fq_name), line, column)
}

#[allow(dead_code)]
pub fn loc_threshold() -> MetricThreshold {
    MetricThreshold::new("CoreLinesOfCode", "SourceFile", 0.0, 750.0)
}

/// Lines-of-code threshold violation on the given element
#[allow(dead_code)]
pub fn loc_violation(fq_name: &str, value: f64) -> SingleElementIssue {
    SingleElementIssue::new("ThresholdViolation", "Lines of code", element(fq_name), 1, 0)
        .with_threshold(value, loc_threshold())
}

#[allow(dead_code)]
pub fn cycle(key: &str, name: &str, members: &[&str]) -> CycleGroupIssue {
    CycleGroupIssue::new(key, name, members.iter().map(|m| element(m)).collect())
}

#[allow(dead_code)]
pub fn duplicate_block(name: &str, files: &[&str]) -> DuplicateCodeBlockIssue {
    let occurrences = files
        .iter()
        .zip(1..)
        .map(|(f, i)| DuplicateCodeBlockOccurrence::new(element(f), i * 10, 15))
        .collect();
    DuplicateCodeBlockIssue::new("DuplicateCode", name, 15, occurrences)
}
