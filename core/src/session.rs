//! Entry point tying the request builder to a transport and a worker pool.

use std::sync::Arc;

use crate::call::{Call, Parser};
use crate::client::CmaClient;
use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::error::CmaResult;
use crate::http::HttpRequest;
use crate::modules::{Appearances, ContentTypes, Entries, Spaces};
use crate::transport::Transport;

/// A configured management API client.
///
/// Cloning is cheap; clones share the transport and the worker pool.
#[derive(Clone)]
pub struct CmaSession {
    client: CmaClient,
    transport: Arc<dyn Transport>,
    dispatcher: Arc<Dispatcher>,
}

impl std::fmt::Debug for CmaSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmaSession")
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}

impl CmaSession {
    pub fn new(config: &ClientConfig, transport: impl Transport + 'static) -> CmaResult<Self> {
        let client = CmaClient::from_config(config)?;
        Ok(Self {
            client,
            transport: Arc::new(transport),
            dispatcher: Arc::new(Dispatcher::new(config.callback_workers)?),
        })
    }

    /// Session over the blocking `ureq` transport.
    #[cfg(feature = "ureq-transport")]
    pub fn connect(config: &ClientConfig) -> CmaResult<Self> {
        Self::new(config, crate::transport::UreqTransport::new())
    }

    pub fn client(&self) -> &CmaClient {
        &self.client
    }

    pub fn entries(&self) -> Entries<'_> {
        Entries::new(self)
    }

    pub fn content_types(&self) -> ContentTypes<'_> {
        ContentTypes::new(self)
    }

    pub fn spaces(&self) -> Spaces<'_> {
        Spaces::new(self)
    }

    pub fn appearances(&self) -> Appearances<'_> {
        Appearances::new(self)
    }

    pub(crate) fn call<R>(&self, request: CmaResult<HttpRequest>, parse: Parser<R>) -> Call<R> {
        Call::new(
            self.client.clone(),
            Arc::clone(&self.transport),
            Arc::clone(&self.dispatcher),
            request,
            parse,
        )
    }
}
