//! Typed workload shapes.
//!
//! These are deliberately permissive: every field defaults when absent or
//! `null`, so a container without a `name` still yields its image. Fields the
//! extractor never reads are ignored during deserialization.

use crate::objectkinds::WorkloadKind;
use serde::{Deserialize, Deserializer};

/// A decoded workload document, keyed by its `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum Workload {
    Pod(Box<PodData>),
    Deployment(Box<TemplatedData>),
    DaemonSet(Box<TemplatedData>),
    ReplicaSet(Box<TemplatedData>),
    StatefulSet(Box<TemplatedData>),
    Job(Box<TemplatedData>),
    CronJob(Box<CronJobData>),
    List(Box<ListData>),
}

impl Workload {
    /// Get the object kind.
    pub fn kind(&self) -> WorkloadKind {
        match self {
            Self::Pod(_) => WorkloadKind::Pod,
            Self::Deployment(_) => WorkloadKind::Deployment,
            Self::DaemonSet(_) => WorkloadKind::DaemonSet,
            Self::ReplicaSet(_) => WorkloadKind::ReplicaSet,
            Self::StatefulSet(_) => WorkloadKind::StatefulSet,
            Self::Job(_) => WorkloadKind::Job,
            Self::CronJob(_) => WorkloadKind::CronJob,
            Self::List(_) => WorkloadKind::List,
        }
    }

    /// Get the object's metadata.
    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Self::Pod(d) => &d.metadata,
            Self::Deployment(d)
            | Self::DaemonSet(d)
            | Self::ReplicaSet(d)
            | Self::StatefulSet(d)
            | Self::Job(d) => &d.metadata,
            Self::CronJob(d) => &d.metadata,
            Self::List(d) => &d.metadata,
        }
    }

    /// Get the object's name, or an empty string.
    pub fn name(&self) -> &str {
        &self.metadata().name
    }

    /// The embedded pod specification. `List` has none.
    pub fn pod_spec(&self) -> Option<&PodSpec> {
        match self {
            Self::Pod(d) => Some(&d.spec),
            Self::Deployment(d)
            | Self::DaemonSet(d)
            | Self::ReplicaSet(d)
            | Self::StatefulSet(d)
            | Self::Job(d) => Some(&d.spec.template.spec),
            Self::CronJob(d) => Some(&d.spec.job_template.spec.template.spec),
            Self::List(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: PodSpec,
}

/// Shape shared by every controller that embeds `spec.template.spec`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplatedData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: TemplatedSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplatedSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub template: PodTemplateSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodTemplateSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: PodSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CronJobData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: CronJobSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJobSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_template: JobTemplateSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobTemplateSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: TemplatedSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    /// Embedded documents, kept untyped until each one is dispatched.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<serde_yaml::Value>,
}

/// Main and init containers, in source order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub containers: Vec<ContainerSpec>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub init_containers: Vec<ContainerSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContainerSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
