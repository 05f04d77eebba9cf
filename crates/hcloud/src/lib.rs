//! Async client for the Hetzner Cloud API.
//!
//! The [`Client`] hands out endpoints. [`ServerActionsEndpoint`] covers every
//! action a server supports, from power management to rescue mode:
//!
//! ```no_run
//! # async fn run() -> hcloud::Result<()> {
//! let client = hcloud::Client::from_env()?;
//! let action = client.server_actions().reboot(42_u64).await?;
//! println!("{} is {}", action.command, action.status);
//! # Ok(())
//! # }
//! ```
//!
//! Resources are referenced either by id or by a previously fetched object;
//! both produce the same request.

#![deny(missing_docs)]

pub mod actions;
pub mod client;
pub mod models;
pub mod servers;

pub use actions::{ServerActionList, ServerActionsEndpoint};
pub use client::{Client, ClientBuilder};
pub use hcloud_core::client::{ApiRequest, ClientConfig, HttpTransport, Transport};
pub use hcloud_core::config::HcloudConfig;
pub use hcloud_core::id::{
    ActionId, IdOrObject, Identified, ImageId, IsoId, NetworkId, ServerId, ServerTypeId, SshKeyId,
};
pub use hcloud_core::Error;
pub use models::{
    Action, ActionError, ActionListParams, ActionResource, ActionStatus, ChangeProtectionRequest,
    ConsoleResult, CreateImageResult, Image, ImageType, Iso, Meta, MetricType, Metrics,
    MetricsParams, Pagination, RescueType, RootPasswordResult, Server, ServerStatus, ServerType,
    SshKey, TimeSeries,
};
pub use servers::ServersEndpoint;

/// Convenient result alias that reuses the shared error type.
pub type Result<T> = hcloud_core::Result<T>;
