use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::{
    codec::{JsonCodec, ObjectCodec},
    errors::{Result, ReviewError},
};

/// JSON codec keeping track of how many times it has been asked to decode.
#[derive(Default)]
pub(crate) struct CountingCodec {
    decodes: AtomicUsize,
}

impl CountingCodec {
    pub(crate) fn decodes(&self) -> usize {
        self.decodes.load(Ordering::SeqCst)
    }
}

impl ObjectCodec for CountingCodec {
    fn decode<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<T> {
        self.decodes.fetch_add(1, Ordering::SeqCst);
        JsonCodec.decode(raw)
    }

    fn encode<T: Serialize>(&self, object: &T) -> Result<Value> {
        JsonCodec.encode(object)
    }
}

/// JSON codec that is unable to encode anything.
pub(crate) struct BrokenEncoderCodec;

impl ObjectCodec for BrokenEncoderCodec {
    fn decode<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<T> {
        JsonCodec.decode(raw)
    }

    fn encode<T: Serialize>(&self, _object: &T) -> Result<Value> {
        Err(ReviewError::Encode(
            <serde_json::Error as serde::ser::Error>::custom("encoder is broken"),
        ))
    }
}

pub(crate) fn service_with_ingress(ingress: Value) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Service",
        "metadata": {
            "name": "kube-apiserver",
            "namespace": "shoot--foo--bar",
            "labels": {"app": "kubernetes", "role": "apiserver"}
        },
        "spec": {
            "type": "LoadBalancer",
            "ports": [
                {"name": "kube-apiserver", "port": 443, "protocol": "TCP", "targetPort": 443}
            ],
            "selector": {"app": "kubernetes", "role": "apiserver"}
        },
        "status": {
            "loadBalancer": {"ingress": ingress}
        }
    })
}

pub(crate) fn etcd_container() -> Value {
    json!({
        "name": "etcd",
        "image": "eu.gcr.io/gardener-project/gardener/etcd:v3.4.13-bootstrap",
        "command": ["/var/etcd/bin/bootstrap.sh"],
        "ports": [
            {"name": "serverport", "containerPort": 2380, "protocol": "TCP"},
            {"name": "clientport", "containerPort": 2379, "protocol": "TCP"}
        ],
        "readinessProbe": {
            "httpGet": {"path": "/healthz", "port": 8080, "scheme": "HTTP"},
            "initialDelaySeconds": 15,
            "periodSeconds": 5
        },
        "volumeMounts": [
            {"name": "etcd-main", "mountPath": "/var/etcd/data/"}
        ]
    })
}

pub(crate) fn backup_restore_container() -> Value {
    json!({
        "name": "backup-restore",
        "image": "eu.gcr.io/gardener-project/gardener/etcdbrctl:v0.12.0",
        "command": ["etcdbrctl", "server"],
        "ports": [
            {"name": "server", "containerPort": 8080, "protocol": "TCP"}
        ]
    })
}

pub(crate) fn statefulset(name: &str, containers: Vec<Value>) -> Value {
    json!({
        "apiVersion": "apps/v1",
        "kind": "StatefulSet",
        "metadata": {
            "name": name,
            "namespace": "shoot--foo--bar",
            "labels": {"app": "etcd-statefulset", "role": "main"}
        },
        "spec": {
            "replicas": 1,
            "selector": {"matchLabels": {"app": "etcd-statefulset", "role": "main"}},
            "serviceName": format!("{name}-client"),
            "template": {
                "metadata": {"labels": {"app": "etcd-statefulset", "role": "main"}},
                "spec": {"containers": containers}
            }
        }
    })
}

/// A StatefulSet shaped like the ones etcd-druid creates, as sent by the
/// API server: server populated metadata, `null` timestamps in the embedded
/// templates and a `status`.
pub(crate) fn etcd_druid_statefulset(name: &str) -> Value {
    json!({
        "apiVersion": "apps/v1",
        "kind": "StatefulSet",
        "metadata": {
            "name": name,
            "namespace": "shoot--foo--bar",
            "uid": "2b9c6f0e-4c1d-4a57-9d0b-7f3b1f9a0c55",
            "resourceVersion": "184467",
            "generation": 3,
            "creationTimestamp": "2024-05-14T09:12:31Z",
            "labels": {"gardener.cloud/role": "controlplane", "instance": name, "name": "etcd"},
            "annotations": {"gardener.cloud/owned-by": format!("shoot--foo--bar/{name}")},
            "ownerReferences": [{
                "apiVersion": "druid.gardener.cloud/v1alpha1",
                "kind": "Etcd",
                "name": name,
                "uid": "8f4d2a61-0b3e-4c9a-a1f2-5e6d7c8b9a01",
                "controller": true,
                "blockOwnerDeletion": true
            }]
        },
        "spec": {
            "replicas": 1,
            "revisionHistoryLimit": 10,
            "podManagementPolicy": "Parallel",
            "serviceName": format!("{name}-peer"),
            "selector": {"matchLabels": {"instance": name, "name": "etcd"}},
            "updateStrategy": {"type": "RollingUpdate"},
            "persistentVolumeClaimRetentionPolicy": {
                "whenDeleted": "Retain",
                "whenScaled": "Retain"
            },
            "template": {
                "metadata": {
                    "creationTimestamp": null,
                    "labels": {"instance": name, "name": "etcd"}
                },
                "spec": {
                    "containers": [
                        {
                            "name": "etcd",
                            "image": "europe-docker.pkg.dev/gardener-project/releases/gardener/etcd-wrapper:v0.1.1",
                            "imagePullPolicy": "IfNotPresent",
                            "command": ["/var/etcd/bin/bootstrap.sh"],
                            "ports": [
                                {"name": "serverport", "containerPort": 2380, "protocol": "TCP"},
                                {"name": "clientport", "containerPort": 2379, "protocol": "TCP"}
                            ],
                            "readinessProbe": {
                                "httpGet": {"path": "/readyz", "port": 9095, "scheme": "HTTPS"},
                                "initialDelaySeconds": 15,
                                "periodSeconds": 5,
                                "timeoutSeconds": 1,
                                "successThreshold": 1,
                                "failureThreshold": 5
                            },
                            "resources": {"requests": {"cpu": "50m", "memory": "128Mi"}},
                            "terminationMessagePath": "/dev/termination-log",
                            "terminationMessagePolicy": "File",
                            "volumeMounts": [
                                {"name": name, "mountPath": "/var/etcd/data/"},
                                {"name": "client-url-ca-etcd", "mountPath": "/var/etcd/ssl/ca"}
                            ]
                        },
                        {
                            "name": "backup-restore",
                            "image": "europe-docker.pkg.dev/gardener-project/releases/gardener/etcdbrctl:v0.28.0",
                            "imagePullPolicy": "IfNotPresent",
                            "args": ["server", "--enable-snapshot-lease-renewal=true"],
                            "ports": [{"name": "server", "containerPort": 8080, "protocol": "TCP"}],
                            "resources": {},
                            "terminationMessagePath": "/dev/termination-log",
                            "terminationMessagePolicy": "File"
                        }
                    ],
                    "dnsPolicy": "ClusterFirst",
                    "restartPolicy": "Always",
                    "schedulerName": "default-scheduler",
                    "securityContext": {},
                    "serviceAccountName": name,
                    "terminationGracePeriodSeconds": 30,
                    "volumes": [
                        {"name": "client-url-ca-etcd", "secret": {"secretName": "ca-etcd-bundle", "defaultMode": 420}}
                    ]
                }
            },
            "volumeClaimTemplates": [{
                "apiVersion": "v1",
                "kind": "PersistentVolumeClaim",
                "metadata": {"name": name, "creationTimestamp": null},
                "spec": {
                    "accessModes": ["ReadWriteOnce"],
                    "resources": {"requests": {"storage": "10Gi"}},
                    "volumeMode": "Filesystem"
                },
                "status": {"phase": "Pending"}
            }]
        },
        "status": {
            "replicas": 1,
            "readyReplicas": 1,
            "currentReplicas": 1,
            "updatedReplicas": 1,
            "availableReplicas": 1,
            "currentRevision": format!("{name}-6c9f7d8b54"),
            "updateRevision": format!("{name}-6c9f7d8b54"),
            "observedGeneration": 3,
            "collisionCount": 0
        }
    })
}

pub(crate) fn to_raw(object: &Value) -> Vec<u8> {
    serde_json::to_vec(object).expect("cannot serialize test object")
}
