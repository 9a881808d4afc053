pub const SERVICES_RESOURCE: &str = "services";
pub const STATEFULSETS_RESOURCE: &str = "statefulsets";
pub const CORE_GROUP: &str = "";
pub const APPS_GROUP: &str = "apps";
pub const STATUS_SUBRESOURCE: &str = "status";

pub const LOCALHOST: &str = "localhost";
pub const LOCALHOST_INGRESS_DENIED_MESSAGE: &str =
    "not allowed to set localhost as LoadBalancer ingress hostname";

/// StatefulSets managed by etcd-druid that must become ready without the
/// backup-restore sidecar.
pub const ETCD_STATEFULSET_NAMES: [&str; 2] = ["etcd-main", "etcd-events"];
pub const ETCD_CONTAINER_NAME: &str = "etcd";
pub const ETCD_BINARY: &str = "etcd";
pub const ETCD_CONFIG_FILE: &str = "/bootstrap/etcd.conf.yml";
pub const ETCD_CLIENT_PORT: u16 = 2379;
pub const ETCD_CLIENT_CERT_FILE: &str = "/var/etcd/ssl/client/tls.crt";
pub const ETCD_CLIENT_KEY_FILE: &str = "/var/etcd/ssl/client/tls.key";
pub const ETCD_CA_FILE: &str = "/var/etcd/ssl/ca/ca.crt";

pub const METRICS_PORT_NAME: &str = "metrics";
pub const METRICS_PORT: i32 = 8080;
pub const METRICS_PORT_PROTOCOL: &str = "TCP";
