//! Workload kinds and where each one keeps its pod specification.

use std::fmt;

/// The fixed set of object kinds the extractor recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkloadKind {
    Pod,
    Deployment,
    DaemonSet,
    ReplicaSet,
    StatefulSet,
    Job,
    CronJob,
    List,
}

impl WorkloadKind {
    /// Every recognized kind, `List` last.
    pub const ALL: [WorkloadKind; 8] = [
        Self::Pod,
        Self::Deployment,
        Self::DaemonSet,
        Self::ReplicaSet,
        Self::StatefulSet,
        Self::Job,
        Self::CronJob,
        Self::List,
    ];

    /// Get the string representation matching Kubernetes kind names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pod => "Pod",
            Self::Deployment => "Deployment",
            Self::DaemonSet => "DaemonSet",
            Self::ReplicaSet => "ReplicaSet",
            Self::StatefulSet => "StatefulSet",
            Self::Job => "Job",
            Self::CronJob => "CronJob",
            Self::List => "List",
        }
    }

    /// Parse from a Kubernetes kind string.
    pub fn from_kind(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == kind)
    }

    /// Group versions the typed decoder has a shape registered for.
    pub fn api_versions(&self) -> &'static [&'static str] {
        match self {
            Self::Pod | Self::List => &["v1"],
            Self::Deployment => &[
                "apps/v1",
                "apps/v1beta1",
                "apps/v1beta2",
                "extensions/v1beta1",
            ],
            Self::DaemonSet | Self::ReplicaSet => {
                &["apps/v1", "apps/v1beta2", "extensions/v1beta1"]
            }
            Self::StatefulSet => &["apps/v1", "apps/v1beta1", "apps/v1beta2"],
            Self::Job => &["batch/v1"],
            Self::CronJob => &["batch/v1", "batch/v1beta1"],
        }
    }

    /// Check whether `api_version` is registered for this kind.
    pub fn accepts_api_version(&self, api_version: &str) -> bool {
        self.api_versions().contains(&api_version)
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the pod specification sits relative to the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PodSpecLocation {
    /// `spec`
    Spec,
    /// `spec.template.spec`
    Template,
    /// `spec.jobTemplate.spec.template.spec`
    JobTemplate,
}

impl PodSpecLocation {
    /// Path segments from the document root to the pod spec.
    pub fn path(&self) -> &'static [&'static str] {
        match self {
            Self::Spec => &["spec"],
            Self::Template => &["spec", "template", "spec"],
            Self::JobTemplate => &["spec", "jobTemplate", "spec", "template", "spec"],
        }
    }

    /// Dotted form of [`path`](Self::path), for messages.
    pub fn dotted(&self) -> String {
        self.path().join(".")
    }
}

/// Immutable kind → pod spec location table shared by every strategy.
#[derive(Debug, Clone, Copy)]
pub struct KindTable {
    entries: &'static [(WorkloadKind, PodSpecLocation)],
}

const BUILTIN_ENTRIES: &[(WorkloadKind, PodSpecLocation)] = &[
    (WorkloadKind::Pod, PodSpecLocation::Spec),
    (WorkloadKind::Deployment, PodSpecLocation::Template),
    (WorkloadKind::DaemonSet, PodSpecLocation::Template),
    (WorkloadKind::ReplicaSet, PodSpecLocation::Template),
    (WorkloadKind::StatefulSet, PodSpecLocation::Template),
    (WorkloadKind::Job, PodSpecLocation::Template),
    (WorkloadKind::CronJob, PodSpecLocation::JobTemplate),
];

impl KindTable {
    /// The built-in table covering every workload kind except `List`.
    pub const fn builtin() -> Self {
        Self {
            entries: BUILTIN_ENTRIES,
        }
    }

    /// Look up the pod spec location of a kind.
    pub fn locate(&self, kind: WorkloadKind) -> Option<PodSpecLocation> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, loc)| *loc)
    }

    /// Check if a kind has a pod spec entry.
    pub fn supports(&self, kind: WorkloadKind) -> bool {
        self.locate(kind).is_some()
    }

    /// Check a raw kind string against the table.
    pub fn supports_kind_str(&self, kind: &str) -> bool {
        WorkloadKind::from_kind(kind).is_some_and(|k| self.supports(k))
    }

    /// Iterate the supported kinds in table order.
    pub fn kinds(&self) -> impl Iterator<Item = WorkloadKind> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }
}

impl Default for KindTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kind_round_trips_names() {
        for kind in WorkloadKind::ALL {
            assert_eq!(WorkloadKind::from_kind(kind.as_str()), Some(kind));
        }
        assert_eq!(WorkloadKind::from_kind("Service"), None);
        assert_eq!(WorkloadKind::from_kind("pod"), None);
    }

    #[test]
    fn test_builtin_table_locations() {
        let table = KindTable::builtin();
        assert_eq!(table.locate(WorkloadKind::Pod), Some(PodSpecLocation::Spec));
        assert_eq!(
            table.locate(WorkloadKind::StatefulSet),
            Some(PodSpecLocation::Template)
        );
        assert_eq!(
            table.locate(WorkloadKind::CronJob).map(|l| l.dotted()),
            Some("spec.jobTemplate.spec.template.spec".to_string())
        );
        assert_eq!(table.locate(WorkloadKind::List), None);
    }

    #[test]
    fn test_table_excludes_list() {
        let table = KindTable::default();
        assert_eq!(table.kinds().count(), 7);
        assert!(!table.supports(WorkloadKind::List));
        assert!(table.supports_kind_str("Job"));
        assert!(!table.supports_kind_str("List"));
        assert!(!table.supports_kind_str("ConfigMap"));
    }

    #[test]
    fn test_api_versions() {
        assert!(WorkloadKind::Deployment.accepts_api_version("apps/v1"));
        assert!(!WorkloadKind::Deployment.accepts_api_version("v1"));
        assert!(WorkloadKind::CronJob.accepts_api_version("batch/v1beta1"));
        assert!(!WorkloadKind::Job.accepts_api_version("batch/v1beta1"));
    }
}
