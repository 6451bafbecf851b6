use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::codec::{DEFAULT_MAX_BODY_SIZE, RequestDecoder, ResponseEncoder};
use crate::handler::Handler;
use crate::protocol::{HttpError, Message, ParseError, Request, Response, ResponseOptions, RouteResult, SendError};

use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{error, info, trace, warn};

/// Initial capacity of the read buffer
const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Where a connection is in its request/response cycle.
///
/// ```text
/// AwaitingRequest -> Processing -> Responded -> AwaitingRequest
///        |                             |
///        +-----------> Closed <--------+
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    AwaitingRequest,
    Processing,
    Responded,
    Closed,
}

/// Tunables of a single connection.
#[derive(Debug, Copy, Clone)]
pub struct ConnectionOptions {
    max_body_size: u64,
    idle_timeout: Option<Duration>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self { max_body_size: DEFAULT_MAX_BODY_SIZE, idle_timeout: None }
    }
}

impl ConnectionOptions {
    pub fn max_body_size(mut self, max_body_size: u64) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    /// Closes the connection when no request arrives within `idle_timeout`.
    pub fn idle_timeout(mut self, idle_timeout: Option<Duration>) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }
}

/// An HTTP connection that reads requests and writes responses until closed
///
/// `HttpConnection` owns both halves of one transport for its whole lifetime.
/// Requests are processed one at a time, in order: a pipelined request already
/// sitting in the read buffer is only decoded after the previous response was
/// written.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
///
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    framed_write: FramedWrite<W, ResponseEncoder>,
    idle_timeout: Option<Duration>,
    state: ConnectionState,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_options(reader, writer, ConnectionOptions::default())
    }

    pub fn with_options(reader: R, writer: W, options: ConnectionOptions) -> Self {
        let decoder = RequestDecoder::with_max_body_size(options.max_body_size);
        Self {
            framed_read: FramedRead::with_capacity(reader, decoder, READ_BUFFER_SIZE),
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
            idle_timeout: options.idle_timeout,
            state: ConnectionState::AwaitingRequest,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Serves requests until the peer closes, asks to close, or the stream breaks.
    ///
    /// The transport is released before this returns, whatever the outcome.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let result = self.do_process(handler.as_ref()).await;
        self.close().await;
        result
    }

    async fn do_process<H>(&mut self, handler: &H) -> Result<(), HttpError>
    where
        H: Handler,
    {
        loop {
            self.transition(ConnectionState::AwaitingRequest);

            match self.next_message().await {
                Some(Ok(Message::Request(request))) => {
                    self.transition(ConnectionState::Processing);
                    let options = ResponseOptions::from_request(request.header());

                    let result = Self::handle(handler, request).await;
                    self.send_response(Response::new(result, options)).await?;
                    self.transition(ConnectionState::Responded);

                    if options.is_close() {
                        info!("request asked to close, break this connection down");
                        return Ok(());
                    }
                }

                Some(Ok(Message::Malformed(malformed))) => {
                    warn!(cause = %malformed.error(), "receive malformed request");
                    self.transition(ConnectionState::Processing);
                    let options = if malformed.is_close() { ResponseOptions::closing() } else { ResponseOptions::default() };
                    self.send_response(Response::new(RouteResult::bad_request(), options)).await?;
                    self.transition(ConnectionState::Responded);

                    if options.is_close() {
                        info!("malformed request asked to close, break this connection down");
                        return Ok(());
                    }
                }

                Some(Err(e)) if e.is_io() => {
                    warn!(cause = %e, "can't read from connection");
                    return Err(e.into());
                }

                Some(Err(e)) => {
                    error!("can't receive next request, cause {}", e);
                    self.send_response(Response::new(RouteResult::bad_request(), ResponseOptions::closing())).await?;
                    return Err(e.into());
                }

                None => {
                    info!("cant read more request, break this connection down");
                    return Ok(());
                }
            }
        }
    }

    async fn handle<H: Handler>(handler: &H, request: Request) -> RouteResult {
        let method = request.method().clone();
        let path = request.path().to_string();

        let result = match handler.call(request).await {
            Ok(result) => result,
            Err(e) => {
                let e: Box<dyn Error + Send + Sync> = e.into();
                error!("handle response error, cause: {}", e);
                RouteResult::internal_error()
            }
        };

        info!(%method, path = %path, status = result.status().as_u16(), "request handled");
        result
    }

    async fn next_message(&mut self) -> Option<Result<Message, ParseError>> {
        let Some(idle_timeout) = self.idle_timeout else {
            return self.framed_read.next().await;
        };

        match tokio::time::timeout(idle_timeout, self.framed_read.next()).await {
            Ok(message) => message,
            Err(_) => {
                info!(timeout = ?idle_timeout, "connection idle, break this connection down");
                None
            }
        }
    }

    async fn send_response(&mut self, response: Response) -> Result<(), SendError> {
        // send flushes, so a response never waits behind the next request
        self.framed_write.send(response).await
    }

    /// Releases the transport. Calling it again is a no-op.
    pub async fn close(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }
        self.transition(ConnectionState::Closed);

        if let Err(e) = self.framed_write.get_mut().shutdown().await {
            trace!(cause = %e, "shutdown writer error");
        }
    }

    fn transition(&mut self, to: ConnectionState) {
        trace!(from = ?self.state, ?to, "connection state transition");
        self.state = to;
    }
}
