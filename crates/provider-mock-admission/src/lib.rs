pub extern crate json_patch;
pub extern crate k8s_openapi;

pub mod admission_request;
pub mod admission_response;
pub mod codec;
pub mod constants;
pub mod errors;
pub mod review;
pub mod reviewers;

#[cfg(test)]
pub(crate) mod test_utils;
