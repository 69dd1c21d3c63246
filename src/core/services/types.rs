use crate::api::client::RemoteResource;
use crate::api::requests::{RequestCatalog, RequestKind, encode_segment};
use crate::core::context::ServerContext;
use crate::error::AppError;
use std::fmt::Display;
use std::sync::Arc;

/// What every acquisition service needs: the transport, the connection
/// parameters and the request templates. All three are read-only.
#[derive(Clone)]
pub struct ServiceContext {
    pub client: Arc<dyn RemoteResource>,
    pub server: Arc<ServerContext>,
    pub requests: Arc<RequestCatalog>,
}

impl ServiceContext {
    pub fn new(
        client: Arc<dyn RemoteResource>,
        server: ServerContext,
        requests: RequestCatalog,
    ) -> Self {
        Self {
            client,
            server: Arc::new(server),
            requests: Arc::new(requests),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.requests.page_size
    }

    /// Render `kind` with the server URL in the first slot.
    pub fn url(&self, kind: RequestKind, args: &[&dyn Display]) -> Result<String, AppError> {
        let base_url = self.server.base_url();
        let mut slots: Vec<&dyn Display> = Vec::with_capacity(args.len() + 1);
        slots.push(&base_url);
        slots.extend_from_slice(args);

        Ok(self.requests.render(kind, &slots)?)
    }

    pub fn project_key(&self) -> String {
        encode_segment(self.server.project_key())
    }

    pub fn branch(&self) -> String {
        encode_segment(self.server.branch())
    }
}
