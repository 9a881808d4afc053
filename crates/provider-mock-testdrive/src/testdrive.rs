use anyhow::{Result, anyhow};
use provider_mock_admission::admission_request::AdmissionRequest;
use provider_mock_admission::admission_response::AdmissionResponse;
use provider_mock_admission::review::{ReviewRequest, ReviewVerdict};
use std::io::{Read, Write};
use tracing::{Span, debug};

use crate::admission_review::{AdmissionReviewRequest, AdmissionReviewResponse};
use crate::config::{Config, RequestSource, Webhook};

/// Reviews the AdmissionReview found at the configured source and writes the
/// AdmissionReview response, as a single JSON line, to `out`.
///
/// A denied request is not an error.
pub(crate) fn run(config: &Config, out: &mut impl Write) -> Result<()> {
    let admission_review = read_admission_review(&config.request_source)?;

    let (response, patched_object) = review(config.webhook, &admission_review.request)?;

    writeln!(
        out,
        "{}",
        serde_json::to_string(&AdmissionReviewResponse::new(response))?
    )?;

    if config.print_patched_object {
        if let Some(patched_object) = patched_object {
            writeln!(out, "{}", serde_json::to_string_pretty(&patched_object)?)?;
        }
    }

    Ok(())
}

#[tracing::instrument(
    name = "review",
    fields(
        request_uid = request.uid.as_str(),
        webhook = webhook.path(),
        name = request.name.as_deref().unwrap_or_default(),
        namespace = request.namespace.as_deref().unwrap_or_default(),
        operation = request.operation.as_str(),
        resource = request.resource.resource.as_str(),
        resource_group = request.resource.group.as_str(),
        subresource = request.sub_resource.as_deref().unwrap_or_default(),
        allowed = tracing::field::Empty,
        mutated = tracing::field::Empty,
        response_code = tracing::field::Empty,
        response_message = tracing::field::Empty,
    ),
    skip_all
)]
fn review(
    webhook: Webhook,
    request: &AdmissionRequest,
) -> Result<(AdmissionResponse, Option<serde_json::Value>)> {
    let review_request = ReviewRequest::from(request);
    let verdict = webhook.reviewer().review(&review_request);
    debug!(verdict = ?verdict, "request reviewed");

    let response = AdmissionResponse::from_verdict(request.uid.clone(), &verdict)?;
    populate_span_with_review_results(&verdict, &response);

    let patched_object = match &verdict {
        ReviewVerdict::PatchedAllowed { patch } => {
            let mut object: serde_json::Value =
                serde_json::from_slice(&review_request.raw_object)?;
            json_patch::patch(&mut object, patch)
                .map_err(|e| anyhow!("cannot apply patch to the request object: {e}"))?;
            Some(object)
        }
        _ => None,
    };

    Ok((response, patched_object))
}

fn populate_span_with_review_results(verdict: &ReviewVerdict, response: &AdmissionResponse) {
    Span::current().record("allowed", verdict.is_allowed());
    Span::current().record("mutated", response.patch.is_some());
    if let Some(status) = &response.status {
        if let Some(code) = &status.code {
            Span::current().record("response_code", code);
        }
        if let Some(message) = &status.message {
            Span::current().record("response_message", message.as_str());
        }
    }
}

fn read_admission_review(source: &RequestSource) -> Result<AdmissionReviewRequest> {
    let contents = match source {
        RequestSource::Stdin => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| anyhow!("cannot read request from stdin: {e}"))?;
            buffer
        }
        RequestSource::File(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow!("cannot read request from {}: {e}", path.display()))?,
    };

    serde_json::from_str(&contents).map_err(|e| anyhow!("invalid AdmissionReview object: {e}"))
}
