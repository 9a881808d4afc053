//! Admission webhook handlers of the mock provider.
//!
//! * [`ServiceStatusGuard`] validates updates of `services/status`
//! * [`StatefulSetMutator`] patches the etcd StatefulSets so they can become
//!   ready without the backup-restore sidecar

mod service_status_guard;
mod statefulset_mutator;

pub use service_status_guard::ServiceStatusGuard;
pub use statefulset_mutator::StatefulSetMutator;
