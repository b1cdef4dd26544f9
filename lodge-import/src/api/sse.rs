//! Server-Sent Events stream of import notifications

use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use lodge_common::sse::event_bus_sse_stream;
use std::convert::Infallible;

use crate::AppState;

/// GET /events
///
/// Streams:
/// - PropertyImported
/// - PropertyImportFailed
/// - PropertyListingInvalidated
pub async fn event_stream(State(state): State<AppState>) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    event_bus_sse_stream("lodge-import", &state.event_bus)
}
