use crate::{
    admission_request::AdmissionRequest,
    constants::{
        APPS_GROUP, CORE_GROUP, SERVICES_RESOURCE, STATEFULSETS_RESOURCE, STATUS_SUBRESOURCE,
    },
    errors::ReviewError,
};

/// The kind of change a reviewer can act upon, derived from the
/// resource/group/subresource triple of the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceTarget {
    /// `services/status` in the core group
    ServiceStatus,
    /// `statefulsets` in the `apps` group, main resource
    StatefulSet,
    Other,
}

/// A change request, as seen by a reviewer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewRequest {
    pub resource: String,
    pub group: String,
    pub sub_resource: String,
    /// The proposed object, exactly as it was sent over the wire.
    pub raw_object: Vec<u8>,
}

impl ReviewRequest {
    pub fn new(
        resource: impl Into<String>,
        group: impl Into<String>,
        sub_resource: impl Into<String>,
        raw_object: impl Into<Vec<u8>>,
    ) -> Self {
        ReviewRequest {
            resource: resource.into(),
            group: group.into(),
            sub_resource: sub_resource.into(),
            raw_object: raw_object.into(),
        }
    }

    pub fn target(&self) -> ResourceTarget {
        match (
            self.resource.as_str(),
            self.group.as_str(),
            self.sub_resource.as_str(),
        ) {
            (SERVICES_RESOURCE, CORE_GROUP, STATUS_SUBRESOURCE) => ResourceTarget::ServiceStatus,
            (STATEFULSETS_RESOURCE, APPS_GROUP, "") => ResourceTarget::StatefulSet,
            _ => ResourceTarget::Other,
        }
    }
}

impl From<&AdmissionRequest> for ReviewRequest {
    /// DELETE requests have no object, they end up with an empty raw object
    fn from(request: &AdmissionRequest) -> Self {
        ReviewRequest {
            resource: request.resource.resource.clone(),
            group: request.resource.group.clone(),
            sub_resource: request.sub_resource.clone().unwrap_or_default(),
            raw_object: request
                .object
                .as_ref()
                .map(|object| object.get().as_bytes().to_vec())
                .unwrap_or_default(),
        }
    }
}

/// The outcome of a review
#[derive(Clone, Debug, PartialEq)]
pub enum ReviewVerdict {
    Allowed,
    Denied { code: u16, message: String },
    /// The change is accepted once the patch is applied to the proposed object.
    PatchedAllowed { patch: json_patch::Patch },
}

impl ReviewVerdict {
    pub fn denied(code: u16, message: impl Into<String>) -> Self {
        ReviewVerdict::Denied {
            code,
            message: message.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        !matches!(self, ReviewVerdict::Denied { .. })
    }
}

impl From<ReviewError> for ReviewVerdict {
    fn from(error: ReviewError) -> Self {
        ReviewVerdict::denied(error.code(), error.to_string())
    }
}

/// Implemented by every admission webhook handler.
///
/// A review never fails: malformed input and internal faults are reported as
/// [`ReviewVerdict::Denied`].
pub trait Reviewer: Send + Sync {
    fn review(&self, request: &ReviewRequest) -> ReviewVerdict;
}
