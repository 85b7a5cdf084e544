//! Container extraction utilities.

use crate::workload::{ContainerSpec, PodSpec};

/// Extract all containers from a PodSpec (containers + init containers).
pub fn all_containers(pod_spec: &PodSpec) -> impl Iterator<Item = &ContainerSpec> {
    pod_spec
        .containers
        .iter()
        .chain(pod_spec.init_containers.iter())
}

/// Image of every container, main containers first.
///
/// Missing images come through as empty strings and duplicates are kept.
pub fn container_images(pod_spec: &PodSpec) -> Vec<String> {
    all_containers(pod_spec).map(|c| c.image.clone()).collect()
}
