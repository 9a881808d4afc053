use k8s_openapi::api::core::v1::Service;
use tracing::{debug, info, warn};

use crate::{
    codec::{JsonCodec, ObjectCodec},
    constants::{LOCALHOST, LOCALHOST_INGRESS_DENIED_MESSAGE},
    review::{ResourceTarget, ReviewRequest, ReviewVerdict, Reviewer},
};

/// Intercepts updates to the status of the kube-apiserver Service of the
/// shoot control plane.
///
/// The mock infrastructure has no real load balancer, reporting `localhost`
/// as its ingress hostname would make the shoot unreachable.
pub struct ServiceStatusGuard<C = JsonCodec> {
    codec: C,
}

impl<C: ObjectCodec> ServiceStatusGuard<C> {
    pub fn new(codec: C) -> Self {
        ServiceStatusGuard { codec }
    }
}

impl Default for ServiceStatusGuard {
    fn default() -> Self {
        ServiceStatusGuard::new(JsonCodec)
    }
}

impl<C: ObjectCodec> Reviewer for ServiceStatusGuard<C> {
    fn review(&self, request: &ReviewRequest) -> ReviewVerdict {
        debug!(webhook = "service", "received request");
        if request.target() != ResourceTarget::ServiceStatus {
            return ReviewVerdict::Allowed;
        }

        let service: Service = match self.codec.decode(&request.raw_object) {
            Ok(service) => service,
            Err(e) => {
                warn!(error = %e, "cannot review service status");
                return e.into();
            }
        };

        info!(
            namespace = service.metadata.namespace.as_deref().unwrap_or_default(),
            name = service.metadata.name.as_deref().unwrap_or_default(),
            "received update for service status"
        );

        if has_localhost_ingress(&service) {
            return ReviewVerdict::denied(400, LOCALHOST_INGRESS_DENIED_MESSAGE);
        }

        ReviewVerdict::Allowed
    }
}

// Entries with an IP and no hostname are not checked
fn has_localhost_ingress(service: &Service) -> bool {
    service
        .status
        .as_ref()
        .and_then(|status| status.load_balancer.as_ref())
        .and_then(|load_balancer| load_balancer.ingress.as_ref())
        .is_some_and(|ingress| {
            ingress
                .iter()
                .any(|entry| entry.hostname.as_deref() == Some(LOCALHOST))
        })
}
