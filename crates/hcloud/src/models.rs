//! Hetzner Cloud models: resources, action records, request bodies and the
//! composite results returned by server actions.

use chrono::{DateTime, Utc};
use hcloud_core::id::{ActionId, ImageId, IsoId, NetworkId, ServerId, ServerTypeId, SshKeyId};
use hcloud_core::identified;
use hcloud_core::query::{ListParams, QueryParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Options for listing the actions of a server.
///
/// Keys may be given in any casing (`perPage`, `per_page`); they are sent as
/// `snake_case`.
pub type ActionListParams = ListParams;

/// Lifecycle state of an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    /// Still in progress.
    Running,
    /// Finished successfully.
    Success,
    /// Finished with an error.
    Error,
}

impl ActionStatus {
    /// Returns the status as sent by the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asynchronous operation performed by the provider.
///
/// Each mutating server call returns the freshly queued action. The value is a
/// snapshot; poll [`crate::ServerActionsEndpoint::get`] to observe progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Action {
    /// Action id.
    pub id: ActionId,
    /// Command name (e.g. `reboot_server`).
    pub command: String,
    /// Current status.
    pub status: ActionStatus,
    /// Progress in percent.
    #[serde(default)]
    pub progress: u8,
    /// Start timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started: Option<DateTime<Utc>>,
    /// Finish timestamp, unset while running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished: Option<DateTime<Utc>>,
    /// Resources touched by the action.
    #[serde(default)]
    pub resources: Vec<ActionResource>,
    /// Error detail when the action failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ActionError>,
}

impl Action {
    /// Returns true while the action has not finished.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == ActionStatus::Running
    }

    /// Returns true once the action has finished, successfully or not.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.is_running()
    }

    /// Returns true if the action finished successfully.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Success
    }

    /// Returns true if the action failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == ActionStatus::Error
    }
}

/// Reference to a resource affected by an action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionResource {
    /// Resource id.
    pub id: u64,
    /// Resource type (`server`, `image`, ...).
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// Error detail of a failed action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionError {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

/// Response metadata of list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meta {
    /// Pagination block, absent on unpaginated responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Page markers of a list response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-based).
    pub page: u32,
    /// Entries per page.
    pub per_page: u32,
    /// Previous page, if any.
    #[serde(default)]
    pub previous_page: Option<u32>,
    /// Next page, if any.
    #[serde(default)]
    pub next_page: Option<u32>,
    /// Last page, if known.
    #[serde(default)]
    pub last_page: Option<u32>,
    /// Total number of entries, if known.
    #[serde(default)]
    pub total_entries: Option<u64>,
}

/// Protection flags of a resource.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Protection {
    /// Delete protection.
    #[serde(default)]
    pub delete: bool,
    /// Rebuild protection (servers only).
    #[serde(default)]
    pub rebuild: bool,
}

/// Image flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    /// Distribution image maintained by the provider.
    System,
    /// User-created snapshot.
    #[default]
    Snapshot,
    /// Automatic backup bound to a server.
    Backup,
    /// Application image.
    App,
    /// Any type this client does not know yet.
    #[serde(other)]
    Unknown,
}

/// Availability of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    /// Ready to use.
    Available,
    /// Still being created.
    Creating,
    /// Not usable.
    Unavailable,
    /// Any status this client does not know yet.
    #[serde(other)]
    Unknown,
}

/// Source server of a snapshot or backup image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedFrom {
    /// Server id.
    pub id: ServerId,
    /// Server name at creation time.
    pub name: String,
}

/// Disk image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    /// Image id.
    pub id: ImageId,
    /// Image type.
    #[serde(rename = "type")]
    pub image_type: ImageType,
    /// Image status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ImageStatus>,
    /// Unique name (system images only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Size of the stored image in GB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<f64>,
    /// Size of the disk contained in the image in GB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_size: Option<f64>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Source server for snapshots and backups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_from: Option<CreatedFrom>,
    /// Server a backup is bound to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_to: Option<ServerId>,
    /// Operating system flavour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_flavor: Option<String>,
    /// Operating system version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
    /// Whether the image supports rapid deploy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rapid_deploy: Option<bool>,
    /// Protection flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protection: Option<Protection>,
    /// Deprecation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<DateTime<Utc>>,
    /// User labels.
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// Server plan (cores, memory, disk).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerType {
    /// Server type id.
    pub id: ServerTypeId,
    /// Unique name (e.g. `cx22`).
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of cores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores: Option<u32>,
    /// Memory in GB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<f64>,
    /// Disk size in GB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<u64>,
    /// Storage type (`local`, `network`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<String>,
    /// CPU type (`shared`, `dedicated`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_type: Option<String>,
    /// Deprecation flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Prices per location, kept as returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<Value>,
}

/// Public SSH key stored in the project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SshKey {
    /// SSH key id.
    pub id: SshKeyId,
    /// Key name.
    pub name: String,
    /// MD5 fingerprint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    /// Public key material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// User labels.
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

/// Visibility of an ISO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsoType {
    /// Provided for everyone.
    Public,
    /// Uploaded for this project.
    Private,
    /// Any type this client does not know yet.
    #[serde(other)]
    Unknown,
}

/// Installation ISO that can be attached to a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Iso {
    /// ISO id.
    pub id: IsoId,
    /// Unique name (unset for private ISOs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Visibility.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub iso_type: Option<IsoType>,
    /// Deprecation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<DateTime<Utc>>,
}

/// Power and provisioning state of a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    /// Powered on.
    Running,
    /// Being created.
    Initializing,
    /// Powering on.
    Starting,
    /// Powering off.
    Stopping,
    /// Powered off.
    Off,
    /// Being deleted.
    Deleting,
    /// Moving to another host.
    Migrating,
    /// Being rebuilt from an image.
    Rebuilding,
    /// State not reported or not known to this client.
    #[serde(other)]
    Unknown,
}

/// Cloud server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Server {
    /// Server id.
    pub id: ServerId,
    /// Server name.
    pub name: String,
    /// Current status.
    pub status: ServerStatus,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Public network configuration, kept as returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_net: Option<Value>,
    /// Private networks, kept as returned.
    #[serde(default)]
    pub private_net: Vec<Value>,
    /// Server plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_type: Option<ServerType>,
    /// Datacenter, kept as returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<Value>,
    /// Image the server was created from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    /// Attached ISO.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<Iso>,
    /// Whether the rescue system is enabled for the next boot.
    #[serde(default)]
    pub rescue_enabled: bool,
    /// Whether the server is locked by a running action.
    #[serde(default)]
    pub locked: bool,
    /// Backup window, if backups are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_window: Option<String>,
    /// Outbound traffic this billing period, in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outgoing_traffic: Option<u64>,
    /// Inbound traffic this billing period, in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingoing_traffic: Option<u64>,
    /// Included free traffic, in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included_traffic: Option<u64>,
    /// Protection flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protection: Option<Protection>,
    /// User labels.
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// Primary disk size in GB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_disk_size: Option<u64>,
}

identified!(Action, ActionId);
identified!(Image, ImageId);
identified!(ServerType, ServerTypeId);
identified!(SshKey, SshKeyId);
identified!(Iso, IsoId);
identified!(Server, ServerId);

/// Metric families exposed for servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    /// CPU usage.
    Cpu,
    /// Disk IOPS and bandwidth.
    Disk,
    /// Network packets and bandwidth.
    Network,
}

impl MetricType {
    /// Returns the name used in the `type` query parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Disk => "disk",
            Self::Network => "network",
        }
    }
}

/// Parameters of the server metrics endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsParams {
    /// Metric families to fetch.
    pub types: Vec<MetricType>,
    /// Start of the period.
    pub start: DateTime<Utc>,
    /// End of the period.
    pub end: DateTime<Utc>,
    /// Resolution in seconds; the API picks one when unset.
    pub step: Option<u32>,
}

impl MetricsParams {
    /// Fetch the given families for a period.
    #[must_use]
    pub fn new(types: Vec<MetricType>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            types,
            start,
            end,
            step: None,
        }
    }

    /// Set the resolution in seconds.
    #[must_use]
    pub const fn with_step(mut self, step: u32) -> Self {
        self.step = Some(step);
        self
    }

    /// Convert the parameters into URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut params = QueryParams::new();
        let types = self
            .types
            .iter()
            .map(MetricType::as_str)
            .collect::<Vec<_>>()
            .join(",");
        params.push("type", types);
        params.push("start", self.start.to_rfc3339());
        params.push("end", self.end.to_rfc3339());
        params.push_opt("step", self.step);

        params.into_pairs()
    }
}

/// Server metrics for a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metrics {
    /// Start of the period.
    pub start: DateTime<Utc>,
    /// End of the period.
    pub end: DateTime<Utc>,
    /// Resolution in seconds.
    pub step: f64,
    /// Series keyed by name (e.g. `cpu`, `disk.0.iops.read`).
    #[serde(default)]
    pub time_series: HashMap<String, TimeSeries>,
}

/// Samples of one metric series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeries {
    /// `(unix timestamp, value)` pairs; values arrive as strings.
    pub values: Vec<(f64, String)>,
}

impl TimeSeries {
    /// Samples with their values parsed; unparsable values are `None`.
    pub fn points(&self) -> impl Iterator<Item = (f64, Option<f64>)> + '_ {
        self.values
            .iter()
            .map(|(timestamp, value)| (*timestamp, value.parse::<f64>().ok()))
    }
}

/// Rescue system flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RescueType {
    /// 64-bit Linux rescue system.
    #[default]
    Linux64,
    /// 32-bit Linux rescue system.
    Linux32,
    /// 64-bit FreeBSD rescue system.
    Freebsd64,
}

/// Body of `enable_rescue`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnableRescueRequest {
    /// Rescue system flavour.
    #[serde(rename = "type")]
    pub rescue_type: RescueType,
    /// SSH keys injected into the rescue system.
    pub ssh_keys: Vec<SshKeyId>,
}

/// Body of `create_image`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateImageRequest {
    /// Image type (`snapshot` or `backup`).
    #[serde(rename = "type")]
    pub image_type: ImageType,
    /// Description of the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `rebuild`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RebuildRequest {
    /// Image to rebuild from.
    pub image: ImageId,
}

/// Body of `change_type`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeTypeRequest {
    /// Target server type.
    pub server_type: ServerTypeId,
    /// Whether the disk grows with the new type.
    pub upgrade_disk: bool,
}

/// Body of `enable_backup`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnableBackupRequest {
    /// Backup window (deprecated by the API, chosen automatically when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_window: Option<String>,
}

/// Body of `attach_iso`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachIsoRequest {
    /// ISO to attach.
    pub iso: IsoId,
}

/// Body of `change_dns_ptr`.
///
/// `dns_ptr` is always sent; `null` resets the reverse entry to the default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeDnsPtrRequest {
    /// Primary IP of the server.
    pub ip: String,
    /// Reverse DNS hostname.
    pub dns_ptr: Option<String>,
}

/// Body of `change_protection`; unset flags are left unchanged.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeProtectionRequest {
    /// Delete protection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
    /// Rebuild protection; must match `delete` when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebuild: Option<bool>,
}

impl ChangeProtectionRequest {
    /// Set delete protection.
    #[must_use]
    pub const fn with_delete(mut self, enabled: bool) -> Self {
        self.delete = Some(enabled);
        self
    }

    /// Set rebuild protection.
    #[must_use]
    pub const fn with_rebuild(mut self, enabled: bool) -> Self {
        self.rebuild = Some(enabled);
        self
    }
}

/// Body of `attach_to_network`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachToNetworkRequest {
    /// Network to attach.
    pub network: NetworkId,
    /// Requested private IP; assigned automatically when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Additional alias IPs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_ips: Option<Vec<String>>,
}

/// Body of `detach_from_network`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetachFromNetworkRequest {
    /// Network to detach.
    pub network: NetworkId,
}

/// Action plus the root password it generated.
///
/// Returned by `reset_password`, `enable_rescue` and `rebuild`. The password is
/// unset when the image or rescue system uses SSH keys only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RootPasswordResult {
    /// Generated root password.
    #[serde(default)]
    pub root_password: Option<String>,
    /// Queued action.
    pub action: Action,
}

/// Action plus the image being created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateImageResult {
    /// New image (status `creating`).
    pub image: Image,
    /// Queued action.
    pub action: Action,
}

/// Action plus the credentials of a VNC console session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsoleResult {
    /// WebSocket URL of the console.
    pub wss_url: String,
    /// VNC password.
    pub password: String,
    /// Queued action.
    pub action: Action,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActionEnvelope {
    pub(crate) action: Action,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActionsEnvelope {
    pub(crate) actions: Vec<Action>,
    #[serde(default)]
    pub(crate) meta: Meta,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServerEnvelope {
    pub(crate) server: Server,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MetricsEnvelope {
    pub(crate) metrics: Metrics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hcloud_core::id::Identified;
    use serde_json::json;

    #[test]
    fn action_deserialize_minimal() {
        let action: Action =
            serde_json::from_value(json!({"id": 1, "status": "running", "command": "reboot"}))
                .unwrap();

        assert_eq!(action.id, ActionId::new(1));
        assert_eq!(action.status, ActionStatus::Running);
        assert_eq!(action.progress, 0);
        assert!(action.resources.is_empty());
        assert!(action.started.is_none());
        assert!(action.is_running());
        assert!(!action.is_finished());
    }

    #[test]
    fn action_deserialize_failed() {
        let action: Action = serde_json::from_value(json!({
            "id": 13,
            "command": "start_server",
            "status": "error",
            "progress": 100,
            "started": "2016-01-30T23:55:00+00:00",
            "finished": "2016-01-30T23:56:00+00:00",
            "resources": [{"id": 42, "type": "server"}],
            "error": {"code": "action_failed", "message": "Action failed"}
        }))
        .unwrap();

        assert!(action.is_error());
        assert!(action.is_finished());
        assert_eq!(action.resources[0].resource_type, "server");
        assert_eq!(action.error.as_ref().unwrap().code, "action_failed");
        assert_eq!(
            action.finished,
            Some(Utc.with_ymd_and_hms(2016, 1, 30, 23, 56, 0).unwrap())
        );
    }

    #[test]
    fn action_status_rejects_unknown() {
        let result = serde_json::from_value::<Action>(
            json!({"id": 1, "status": "paused", "command": "reboot"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn action_status_display() {
        assert_eq!(ActionStatus::Success.to_string(), "success");
        assert_eq!(ActionStatus::Error.as_str(), "error");
    }

    #[test]
    fn identified_resources_expose_ids() {
        let iso: Iso = serde_json::from_value(json!({"id": 4711, "name": "FreeBSD-11.0"})).unwrap();
        assert_eq!(iso.id(), IsoId::new(4711));

        let key: SshKey =
            serde_json::from_value(json!({"id": 2323, "name": "My ssh key"})).unwrap();
        assert_eq!(key.id(), SshKeyId::new(2323));
    }

    #[test]
    fn image_unknown_type_and_status() {
        let image: Image = serde_json::from_value(json!({
            "id": 1,
            "type": "marketplace",
            "status": "pending"
        }))
        .unwrap();
        assert_eq!(image.image_type, ImageType::Unknown);
        assert_eq!(image.status, Some(ImageStatus::Unknown));
    }

    #[test]
    fn metrics_params_pairs() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap();
        let types = vec![MetricType::Cpu, MetricType::Network];
        let params = MetricsParams::new(types, start, end).with_step(60);

        let pairs = params.to_pairs();
        assert_eq!(pairs[0], ("type".to_string(), "cpu,network".to_string()));
        assert_eq!(pairs[1].1, "2024-01-01T00:00:00+00:00");
        assert_eq!(pairs[3], ("step".to_string(), "60".to_string()));
    }

    #[test]
    fn time_series_points_parse_values() {
        let series: TimeSeries = serde_json::from_value(json!({
            "values": [[1435781470.622, "42"], [1435781471.622, "n/a"]]
        }))
        .unwrap();
        let points: Vec<_> = series.points().collect();
        assert_eq!(points[0], (1435781470.622, Some(42.0)));
        assert_eq!(points[1].1, None);
    }

    #[test]
    fn request_bodies_serialize_as_documented() {
        assert_eq!(
            serde_json::to_value(EnableRescueRequest {
                rescue_type: RescueType::default(),
                ssh_keys: vec![SshKeyId::new(1)],
            })
            .unwrap(),
            json!({"type": "linux64", "ssh_keys": [1]})
        );
        assert_eq!(
            serde_json::to_value(CreateImageRequest {
                image_type: ImageType::default(),
                description: None,
            })
            .unwrap(),
            json!({"type": "snapshot"})
        );
        assert_eq!(
            serde_json::to_value(ChangeDnsPtrRequest {
                ip: "1.2.3.4".to_string(),
                dns_ptr: None,
            })
            .unwrap(),
            json!({"ip": "1.2.3.4", "dns_ptr": null})
        );
        assert_eq!(
            serde_json::to_value(ChangeProtectionRequest::default().with_delete(true)).unwrap(),
            json!({"delete": true})
        );
    }
}
