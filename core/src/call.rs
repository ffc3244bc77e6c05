//! A prepared operation that can be run blocking or in the background.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::CmaClient;
use crate::dispatch::{CallbackContext, Dispatcher};
use crate::error::CmaResult;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

pub(crate) type Parser<R> = fn(&CmaClient, HttpResponse) -> CmaResult<R>;

/// One management API operation, ready to run.
///
/// The request was built (and validated) when the `Call` was created. A
/// validation failure is kept and reported by `send` or `enqueue` without
/// touching the network. Each call runs at most once and is single-attempt.
#[must_use = "a Call does nothing until `send` or `enqueue` is called"]
pub struct Call<R> {
    client: CmaClient,
    transport: Arc<dyn Transport>,
    dispatcher: Arc<Dispatcher>,
    request: CmaResult<HttpRequest>,
    parse: Parser<R>,
}

impl<R> std::fmt::Debug for Call<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Call").field("request", &self.request).finish_non_exhaustive()
    }
}

impl<R> Call<R> {
    pub(crate) fn new(
        client: CmaClient,
        transport: Arc<dyn Transport>,
        dispatcher: Arc<Dispatcher>,
        request: CmaResult<HttpRequest>,
        parse: Parser<R>,
    ) -> Self {
        Self {
            client,
            transport,
            dispatcher,
            request,
            parse,
        }
    }

    /// The request that will be sent, or the validation error that stops it.
    pub fn request(&self) -> Result<&HttpRequest, &crate::error::CmaError> {
        self.request.as_ref()
    }

    /// Run on the current thread and return the parsed result.
    pub fn send(self) -> CmaResult<R> {
        let request = self.request?;
        execute(&self.client, self.transport.as_ref(), &request, self.parse)
    }
}

impl<R: Send + 'static> Call<R> {
    /// Run on a background worker and deliver the result to `callback` on
    /// the thread that owns `context`, the next time it is pumped. The
    /// callback runs exactly once unless the context is dropped first.
    pub fn enqueue<F>(self, context: &CallbackContext, callback: F) -> CmaResult<()>
    where
        F: FnOnce(CmaResult<R>) + Send + 'static,
    {
        let handle = context.handle();
        let request = match self.request {
            Ok(request) => request,
            Err(err) => {
                handle.post(Box::new(move || callback(Err(err))));
                return Ok(());
            }
        };

        let Call {
            client,
            transport,
            dispatcher,
            parse,
            ..
        } = self;
        dispatcher.submit(Box::new(move || {
            let result = execute(&client, transport.as_ref(), &request, parse);
            handle.post(Box::new(move || callback(result)));
        }))
    }
}

fn execute<R>(client: &CmaClient, transport: &dyn Transport, request: &HttpRequest, parse: Parser<R>) -> CmaResult<R> {
    debug!(method = %request.method, url = %request.url, "sending request");
    let response = transport.execute(request)?;
    let status = response.status;
    parse(client, response).map_err(|err| {
        warn!(method = %request.method, url = %request.url, status, error = %err, "request failed");
        err.with_context(request)
    })
}
