use super::types::ServiceContext;
use crate::AppError;
use crate::api::models::ServerInfo;
use crate::api::requests::RequestKind;
use crate::utils::error_helpers::{convert_body_error, protocol_error};

/// Reported in place of the real status whenever it cannot be retrieved.
pub const STATUS_DOWN: &str = "DOWN";

/// Reads the server's version and health status from its system endpoint.
pub struct ServerInfoService {
    context: ServiceContext,
}

impl ServerInfoService {
    pub fn new(context: ServiceContext) -> Self {
        Self { context }
    }

    /// Server version. Failures propagate.
    pub async fn get_version(&self) -> Result<String, AppError> {
        let (url, info) = self.fetch_info().await?;
        info.version
            .ok_or_else(|| protocol_error(&url, "response has no `version` field").into())
    }

    /// Server health status, or [`STATUS_DOWN`] if it cannot be retrieved.
    ///
    /// Never fails; the cause is logged instead.
    pub async fn get_status(&self) -> String {
        match self.try_status().await {
            Ok(status) => status,
            Err(e) => {
                log::error!("Could not retrieve server status: {}", e);
                STATUS_DOWN.to_string()
            }
        }
    }

    async fn try_status(&self) -> Result<String, AppError> {
        let (url, info) = self.fetch_info().await?;
        info.status
            .ok_or_else(|| protocol_error(&url, "response has no `status` field").into())
    }

    async fn fetch_info(&self) -> Result<(String, ServerInfo), AppError> {
        let url = self.context.url(RequestKind::ServerInfo, &[])?;
        let body = self.context.client.get_json(&url).await?;
        let info: ServerInfo = serde_json::from_value(body).map_err(|e| convert_body_error(e, &url))?;
        Ok((url, info))
    }
}
