//! Server actions: power management, rescue mode, images, ISOs, networking.
//!
//! Every operation is one request against `/servers/{id}/actions/...`. Reads use
//! `GET`, everything else `POST`. Mutating calls return the queued [`Action`]
//! immediately; nothing here waits for the action to finish.

use crate::models::{
    Action, ActionEnvelope, ActionListParams, ActionsEnvelope, AttachIsoRequest,
    AttachToNetworkRequest, ChangeDnsPtrRequest, ChangeProtectionRequest, ChangeTypeRequest,
    ConsoleResult, CreateImageRequest, CreateImageResult, DetachFromNetworkRequest,
    EnableBackupRequest, EnableRescueRequest, Image, ImageType, Iso, Meta, RebuildRequest,
    RescueType, RootPasswordResult, ServerType, SshKey,
};
use crate::Result;
use hcloud_core::client::{ApiRequest, Transport};
use hcloud_core::id::{ActionId, IdOrObject, NetworkId, ServerId};
use hcloud_core::Error;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Endpoint for the actions of servers.
#[derive(Clone)]
pub struct ServerActionsEndpoint {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ServerActionsEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerActionsEndpoint").finish_non_exhaustive()
    }
}

impl ServerActionsEndpoint {
    /// Create the endpoint on top of a transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// List the actions of a server.
    ///
    /// Option keys are rewritten to `snake_case` before they are sent.
    pub async fn list(
        &self,
        server: impl Into<ServerId>,
        params: &ActionListParams,
    ) -> Result<ServerActionList> {
        let server = server.into();
        let path = format!("servers/{server}/actions");
        let request = ApiRequest::get(&path).with_query(params.to_query());

        let envelope: ActionsEnvelope = self.call(request).await?;
        Ok(ServerActionList {
            endpoint: self.clone(),
            server_id: server,
            params: params.clone(),
            meta: envelope.meta,
            actions: envelope.actions,
        })
    }

    /// Fetch a single action of a server.
    pub async fn get(
        &self,
        server: impl Into<ServerId>,
        action: impl Into<ActionId>,
    ) -> Result<Action> {
        let path = format!("servers/{}/actions/{}", server.into(), action.into());
        let envelope: ActionEnvelope = self.call(ApiRequest::get(path)).await?;
        Ok(envelope.action)
    }

    /// Start a server.
    pub async fn power_on(&self, server: impl Into<ServerId>) -> Result<Action> {
        self.action(server.into(), "poweron").await
    }

    /// Cut power to a server.
    pub async fn power_off(&self, server: impl Into<ServerId>) -> Result<Action> {
        self.action(server.into(), "poweroff").await
    }

    /// Send an ACPI reboot request.
    pub async fn reboot(&self, server: impl Into<ServerId>) -> Result<Action> {
        self.action(server.into(), "reboot").await
    }

    /// Hard reset, like pressing the reset button.
    pub async fn reset(&self, server: impl Into<ServerId>) -> Result<Action> {
        self.action(server.into(), "reset").await
    }

    /// Send an ACPI shutdown request.
    pub async fn shutdown(&self, server: impl Into<ServerId>) -> Result<Action> {
        self.action(server.into(), "shutdown").await
    }

    /// Reset the root password; the new password is part of the result.
    pub async fn reset_password(&self, server: impl Into<ServerId>) -> Result<RootPasswordResult> {
        self.post(server.into(), "reset_password", None).await
    }

    /// Boot into the rescue system on the next reboot.
    ///
    /// `rescue_type` defaults to `linux64`. SSH keys may be given as ids or
    /// [`SshKey`] objects.
    pub async fn enable_rescue<'a, K>(
        &self,
        server: impl Into<ServerId>,
        rescue_type: Option<RescueType>,
        ssh_keys: impl IntoIterator<Item = K>,
    ) -> Result<RootPasswordResult>
    where
        K: Into<IdOrObject<'a, SshKey>>,
    {
        let body = EnableRescueRequest {
            rescue_type: rescue_type.unwrap_or_default(),
            ssh_keys: ssh_keys.into_iter().map(|key| key.into().resolve()).collect(),
        };
        let body = to_body(&body)?;
        self.post(server.into(), "enable_rescue", Some(body)).await
    }

    /// Leave rescue mode on the next reboot.
    pub async fn disable_rescue(&self, server: impl Into<ServerId>) -> Result<Action> {
        self.action(server.into(), "disable_rescue").await
    }

    /// Create an image from the server disk.
    ///
    /// `image_type` defaults to `snapshot`.
    pub async fn create_image(
        &self,
        server: impl Into<ServerId>,
        image_type: Option<ImageType>,
        description: Option<&str>,
    ) -> Result<CreateImageResult> {
        let body = CreateImageRequest {
            image_type: image_type.unwrap_or_default(),
            description: description.map(str::to_string),
        };
        let body = to_body(&body)?;
        self.post(server.into(), "create_image", Some(body)).await
    }

    /// Reinstall the server from an image, given as id or [`Image`].
    pub async fn rebuild<'a>(
        &self,
        server: impl Into<ServerId>,
        image: impl Into<IdOrObject<'a, Image>>,
    ) -> Result<RootPasswordResult> {
        let body = RebuildRequest {
            image: image.into().resolve(),
        };
        let body = to_body(&body)?;
        self.post(server.into(), "rebuild", Some(body)).await
    }

    /// Move the server to another plan, given as id or [`ServerType`].
    ///
    /// With `upgrade_disk` false the disk keeps its size so the change can be
    /// reverted.
    pub async fn change_type<'a>(
        &self,
        server: impl Into<ServerId>,
        server_type: impl Into<IdOrObject<'a, ServerType>>,
        upgrade_disk: bool,
    ) -> Result<Action> {
        let body = ChangeTypeRequest {
            server_type: server_type.into().resolve(),
            upgrade_disk,
        };
        self.action_with(server.into(), "change_type", &body).await
    }

    /// Enable automatic backups.
    pub async fn enable_backup(
        &self,
        server: impl Into<ServerId>,
        backup_window: Option<&str>,
    ) -> Result<Action> {
        let body = EnableBackupRequest {
            backup_window: backup_window.map(str::to_string),
        };
        self.action_with(server.into(), "enable_backup", &body).await
    }

    /// Disable automatic backups; existing backups are deleted.
    pub async fn disable_backup(&self, server: impl Into<ServerId>) -> Result<Action> {
        self.action(server.into(), "disable_backup").await
    }

    /// Insert an ISO, given as id or [`Iso`], into the virtual drive.
    pub async fn attach_iso<'a>(
        &self,
        server: impl Into<ServerId>,
        iso: impl Into<IdOrObject<'a, Iso>>,
    ) -> Result<Action> {
        let body = AttachIsoRequest {
            iso: iso.into().resolve(),
        };
        self.action_with(server.into(), "attach_iso", &body).await
    }

    /// Eject the ISO from the virtual drive.
    pub async fn detach_iso(&self, server: impl Into<ServerId>) -> Result<Action> {
        self.action(server.into(), "detach_iso").await
    }

    /// Set the reverse DNS entry of a primary IP; `None` resets it.
    pub async fn change_dns_ptr(
        &self,
        server: impl Into<ServerId>,
        ip: impl Into<String>,
        dns_ptr: Option<&str>,
    ) -> Result<Action> {
        let body = ChangeDnsPtrRequest {
            ip: ip.into(),
            dns_ptr: dns_ptr.map(str::to_string),
        };
        self.action_with(server.into(), "change_dns_ptr", &body).await
    }

    /// Change delete and rebuild protection.
    pub async fn change_protection(
        &self,
        server: impl Into<ServerId>,
        protection: &ChangeProtectionRequest,
    ) -> Result<Action> {
        self.action_with(server.into(), "change_protection", protection)
            .await
    }

    /// Request credentials for a VNC console over WebSocket.
    pub async fn request_console(&self, server: impl Into<ServerId>) -> Result<ConsoleResult> {
        self.post(server.into(), "request_console", None).await
    }

    /// Attach the server to a private network.
    pub async fn attach_to_network(
        &self,
        server: impl Into<ServerId>,
        network: impl Into<NetworkId>,
        ip: Option<&str>,
        alias_ips: Option<Vec<String>>,
    ) -> Result<Action> {
        let body = AttachToNetworkRequest {
            network: network.into(),
            ip: ip.map(str::to_string),
            alias_ips,
        };
        self.action_with(server.into(), "attach_to_network", &body)
            .await
    }

    /// Detach the server from a private network.
    pub async fn detach_from_network(
        &self,
        server: impl Into<ServerId>,
        network: impl Into<NetworkId>,
    ) -> Result<Action> {
        let body = DetachFromNetworkRequest {
            network: network.into(),
        };
        self.action_with(server.into(), "detach_from_network", &body)
            .await
    }

    async fn action(&self, server: ServerId, name: &str) -> Result<Action> {
        let envelope: ActionEnvelope = self.post(server, name, None).await?;
        Ok(envelope.action)
    }

    async fn action_with<B>(&self, server: ServerId, name: &str, body: &B) -> Result<Action>
    where
        B: Serialize + ?Sized,
    {
        let envelope: ActionEnvelope = self.post(server, name, Some(to_body(body)?)).await?;
        Ok(envelope.action)
    }

    async fn post<R>(&self, server: ServerId, name: &str, body: Option<Value>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!(server = %server, action = name, "Requesting server action");
        let mut request = ApiRequest::post(format!("servers/{server}/actions/{name}"));
        if let Some(body) = body {
            request = request.with_body(body);
        }
        self.call(request).await
    }

    async fn call<R>(&self, request: ApiRequest) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let path = request.path.clone();
        let value = self.transport.execute(request).await?;
        serde_json::from_value(value).map_err(|err| {
            Error::Parse(format!("Failed to parse response for `{path}`: {err}"))
        })
    }
}

fn to_body<B>(body: &B) -> Result<Value>
where
    B: Serialize + ?Sized,
{
    serde_json::to_value(body).map_err(Error::from)
}

/// One page of server actions.
///
/// Keeps the request parameters so neighbouring pages can be fetched with the
/// same filters.
#[derive(Debug, Clone)]
pub struct ServerActionList {
    endpoint: ServerActionsEndpoint,
    server_id: ServerId,
    params: ActionListParams,
    meta: Meta,
    actions: Vec<Action>,
}

impl ServerActionList {
    /// Actions on this page.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Consume the page, keeping only the actions.
    #[must_use]
    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }

    /// Response metadata.
    #[must_use]
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Server the actions belong to.
    #[must_use]
    pub const fn server_id(&self) -> ServerId {
        self.server_id
    }

    /// Parameters the page was requested with, as given by the caller.
    #[must_use]
    pub fn params(&self) -> &ActionListParams {
        &self.params
    }

    /// Number of actions on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if the page holds no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate over the actions on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// Returns true if the API reported a following page.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.next_page_number().is_some()
    }

    /// Returns true if the API reported a preceding page.
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.previous_page_number().is_some()
    }

    /// Fetch the following page, or `None` on the last page.
    pub async fn next_page(&self) -> Result<Option<Self>> {
        match self.next_page_number() {
            Some(page) => self.fetch_page(page).await.map(Some),
            None => Ok(None),
        }
    }

    /// Fetch the preceding page, or `None` on the first page.
    pub async fn previous_page(&self) -> Result<Option<Self>> {
        match self.previous_page_number() {
            Some(page) => self.fetch_page(page).await.map(Some),
            None => Ok(None),
        }
    }

    fn next_page_number(&self) -> Option<u32> {
        self.meta.pagination.as_ref().and_then(|p| p.next_page)
    }

    fn previous_page_number(&self) -> Option<u32> {
        self.meta.pagination.as_ref().and_then(|p| p.previous_page)
    }

    async fn fetch_page(&self, page: u32) -> Result<Self> {
        let params = self.params.clone().page(page);
        self.endpoint.list(self.server_id, &params).await
    }
}

impl<'a> IntoIterator for &'a ServerActionList {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
