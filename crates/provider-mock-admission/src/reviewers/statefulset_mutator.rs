use k8s_openapi::api::{
    apps::v1::StatefulSet,
    core::v1::{Container, ContainerPort, ExecAction, Probe},
};
use tracing::{debug, info, warn};

use crate::{
    codec::{JsonCodec, ObjectCodec},
    constants::*,
    errors::Result,
    review::{ResourceTarget, ReviewRequest, ReviewVerdict, Reviewer},
};

/// Intercepts updates to the etcd StatefulSets and mutates them, so that
/// they can become ready without the etcd-backup-restore sidecar.
pub struct StatefulSetMutator<C = JsonCodec> {
    codec: C,
}

impl<C: ObjectCodec> StatefulSetMutator<C> {
    pub fn new(codec: C) -> Self {
        StatefulSetMutator { codec }
    }

    fn mutate(&self, request: &ReviewRequest) -> Result<ReviewVerdict> {
        let mut statefulset: StatefulSet = self.codec.decode(&request.raw_object)?;
        let name = statefulset.metadata.name.clone().unwrap_or_default();

        info!(
            namespace = statefulset
                .metadata
                .namespace
                .as_deref()
                .unwrap_or_default(),
            name = name.as_str(),
            "received update for statefulset"
        );

        if !ETCD_STATEFULSET_NAMES.contains(&name.as_str()) {
            return Ok(ReviewVerdict::Allowed);
        }

        // Fields the typed object cannot hold, like `creationTimestamp: null`,
        // are not part of the change: diff against the unmutated encoding.
        let original = self.codec.encode(&statefulset)?;
        let Some(pod_spec) = statefulset
            .spec
            .as_mut()
            .and_then(|spec| spec.template.spec.as_mut())
        else {
            return Ok(ReviewVerdict::Allowed);
        };

        let mut rewritten = 0;
        for slot in pod_spec
            .containers
            .iter_mut()
            .filter(|container| container.name == ETCD_CONTAINER_NAME)
        {
            *slot = rewrite_etcd_container(std::mem::take(slot), &name);
            rewritten += 1;
        }
        if rewritten == 0 {
            debug!(name = name.as_str(), "no etcd container found");
            return Ok(ReviewVerdict::Allowed);
        }

        let mutated = self.codec.encode(&statefulset)?;

        let patch = json_patch::diff(&original, &mutated);
        if patch.0.is_empty() {
            debug!(name = name.as_str(), "statefulset already mutated");
            return Ok(ReviewVerdict::Allowed);
        }

        Ok(ReviewVerdict::PatchedAllowed { patch })
    }
}

impl Default for StatefulSetMutator {
    fn default() -> Self {
        StatefulSetMutator::new(JsonCodec)
    }
}

impl<C: ObjectCodec> Reviewer for StatefulSetMutator<C> {
    fn review(&self, request: &ReviewRequest) -> ReviewVerdict {
        debug!(webhook = "statefulset", "received request");
        if request.target() != ResourceTarget::StatefulSet {
            return ReviewVerdict::Allowed;
        }

        self.mutate(request).unwrap_or_else(|e| {
            warn!(error = %e, "cannot review statefulset");
            e.into()
        })
    }
}

fn rewrite_etcd_container(mut container: Container, statefulset_name: &str) -> Container {
    container.command = Some(vec![
        ETCD_BINARY.to_owned(),
        "--config-file".to_owned(),
        ETCD_CONFIG_FILE.to_owned(),
    ]);

    let readiness_probe = container.readiness_probe.get_or_insert_with(Probe::default);
    readiness_probe.http_get = None;
    readiness_probe.exec = Some(ExecAction {
        command: Some(readiness_command(statefulset_name)),
    });

    let ports = container.ports.get_or_insert_with(Vec::new);
    if !ports
        .iter()
        .any(|port| port.name.as_deref() == Some(METRICS_PORT_NAME))
    {
        ports.push(ContainerPort {
            name: Some(METRICS_PORT_NAME.to_owned()),
            container_port: METRICS_PORT,
            protocol: Some(METRICS_PORT_PROTOCOL.to_owned()),
            ..Default::default()
        });
    }

    container
}

fn readiness_command(statefulset_name: &str) -> Vec<String> {
    vec![
        "/bin/sh".to_owned(),
        "-ec".to_owned(),
        "ETCDCTL_API=3".to_owned(),
        "etcdctl".to_owned(),
        format!("--cert={ETCD_CLIENT_CERT_FILE}"),
        format!("--key={ETCD_CLIENT_KEY_FILE}"),
        format!("--cacert={ETCD_CA_FILE}"),
        format!("--endpoints=https://{statefulset_name}-0:{ETCD_CLIENT_PORT}"),
        "endpoint".to_owned(),
        "health".to_owned(),
    ]
}
