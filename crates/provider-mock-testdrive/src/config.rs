use anyhow::{Result, anyhow};
use clap::ArgMatches;
use provider_mock_admission::review::Reviewer;
use provider_mock_admission::reviewers::{ServiceStatusGuard, StatefulSetMutator};
use std::path::PathBuf;
use std::str::FromStr;

/// The webhooks served by the mock provider, named after the path they are
/// registered at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Webhook {
    Service,
    StatefulSet,
}

impl Webhook {
    pub fn path(&self) -> &'static str {
        match self {
            Webhook::Service => "/service",
            Webhook::StatefulSet => "/statefulset",
        }
    }

    pub fn reviewer(&self) -> Box<dyn Reviewer> {
        match self {
            Webhook::Service => Box::new(ServiceStatusGuard::default()),
            Webhook::StatefulSet => Box::new(StatefulSetMutator::default()),
        }
    }
}

impl FromStr for Webhook {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim_start_matches('/') {
            "service" => Ok(Webhook::Service),
            "statefulset" => Ok(Webhook::StatefulSet),
            other => Err(anyhow!("unknown webhook: {other}")),
        }
    }
}

/// Where the AdmissionReview is read from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestSource {
    Stdin,
    File(PathBuf),
}

pub struct Config {
    pub webhook: Webhook,
    pub request_source: RequestSource,
    pub print_patched_object: bool,
    pub log_level: String,
    pub log_fmt: String,
    pub log_no_color: bool,
}

impl Config {
    pub fn from_args(matches: &ArgMatches) -> Result<Self> {
        let webhook = matches
            .get_one::<String>("webhook")
            .ok_or_else(|| anyhow!("missing webhook"))?
            .parse::<Webhook>()?;
        let request_source = match matches
            .get_one::<String>("request-path")
            .ok_or_else(|| anyhow!("missing request path"))?
            .as_str()
        {
            "-" => RequestSource::Stdin,
            path => RequestSource::File(PathBuf::from(path)),
        };
        let print_patched_object = matches.get_flag("print-patched-object");

        let log_level = matches
            .get_one::<String>("log-level")
            .expect("This should not happen, there's a default value for log-level")
            .to_owned();
        let log_fmt = matches
            .get_one::<String>("log-fmt")
            .expect("This should not happen, there's a default value for log-fmt")
            .to_owned();
        let log_no_color = matches.get_flag("log-no-color");

        Ok(Self {
            webhook,
            request_source,
            print_patched_object,
            log_level,
            log_fmt,
            log_no_color,
        })
    }
}
