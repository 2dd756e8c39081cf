//! Single-consumer event loop.
//!
//! Every inbound event from every connection goes through one task, so each
//! event is routed and its deliveries queued before the next one is looked at.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::ConnectionId,
    usecase::{InboundEvent, SignalingRouter},
};

use super::state::ConnectionHub;

/// An inbound event tagged with its connection
#[derive(Debug)]
pub struct Envelope {
    pub from: ConnectionId,
    pub event: InboundEvent,
}

/// Spawn the dispatcher; it runs until every sender is dropped.
pub fn spawn_dispatcher(
    router: SignalingRouter,
    hub: Arc<ConnectionHub>,
) -> mpsc::UnboundedSender<Envelope> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Envelope>();

    tokio::spawn(async move {
        while let Some(Envelope { from, event }) = rx.recv().await {
            tracing::trace!("Dispatching {:?} from '{}'", event, from);
            let deliveries = router.handle(&from, event).await;
            hub.deliver(deliveries).await;
        }
        tracing::debug!("Dispatcher stopped");
    });

    tx
}
