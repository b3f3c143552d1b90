//! Request hand-off between the HTTP server task and the control loop.
//!
//! Uses `embassy-sync` bounded channels so the server's handler threads
//! never touch controller state. The handler parks on the response
//! channel until the control loop has answered.
//!
//! ```text
//! ┌──────────────┐ InboundRequest ┌──────────────┐
//! │ httpd task   │───────────────▶│ Control Loop │
//! │ (blocking)   │◀───────────────│ (sync)       │
//! └──────────────┘  ResponseMsg   └──────────────┘
//! ```
//!
//! The server runs one handler at a time, so at most one request is in
//! flight; a response whose id does not match is stale and is dropped.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use super::HttpResponse;
use crate::app::ports::{InboundRequest, RequestId, RequestPort};

/// Outbound response from the control loop, delivered to the handler.
pub struct ResponseMsg {
    pub id: RequestId,
    pub response: HttpResponse,
}

/// Channel depth for inbound requests.
const REQ_DEPTH: usize = 4;

/// Channel depth for responses.
const RESP_DEPTH: usize = 4;

/// Inbound request channel: httpd task → control loop.
pub static REQUEST_CHANNEL: Channel<CriticalSectionRawMutex, InboundRequest, REQ_DEPTH> =
    Channel::new();

/// Outbound response channel: control loop → httpd task.
pub static RESPONSE_CHANNEL: Channel<CriticalSectionRawMutex, ResponseMsg, RESP_DEPTH> =
    Channel::new();

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

/// Queue `path` for the control loop. Fails when the path is too long or
/// the queue is full.
pub fn submit(path: &str) -> Result<RequestId, HttpResponse> {
    let Ok(path) = heapless::String::try_from(path) else {
        return Err(HttpResponse::text(414, "URI Too Long"));
    };
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    if REQUEST_CHANNEL.try_send(InboundRequest { id, path }).is_err() {
        warn!("HTTP: request queue full, answering 503");
        return Err(HttpResponse::unavailable());
    }
    Ok(id)
}

/// Submit `path` and block until the control loop answers it.
pub fn roundtrip(path: &str) -> HttpResponse {
    let id = match submit(path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    loop {
        let msg = futures_lite::future::block_on(RESPONSE_CHANNEL.receive());
        if msg.id == id {
            return msg.response;
        }
        warn!("HTTP: dropping stale response #{}", msg.id);
    }
}

/// [`RequestPort`] over the static channels, used by the control loop.
#[derive(Default)]
pub struct ChannelRequestPort;

impl RequestPort for ChannelRequestPort {
    fn try_next(&mut self) -> Option<InboundRequest> {
        REQUEST_CHANNEL.try_receive().ok()
    }

    fn respond(&mut self, id: RequestId, response: HttpResponse) {
        if RESPONSE_CHANNEL.try_send(ResponseMsg { id, response }).is_err() {
            warn!("HTTP: response queue full, #{} lost", id);
        }
    }
}
