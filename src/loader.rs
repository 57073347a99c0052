//! Background catalog loading
//!
//! Runs the catalog fetch on a tokio task and reports the outcome over a
//! channel, so the UI keeps handling keys while the request is in flight.
//! Errors are logged here, at the fetch boundary, and handed to the UI as text.

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::data::{CatalogClient, Product};

/// Messages sent from a catalog fetch to the main loop
#[derive(Debug, Clone)]
pub enum CatalogMessage {
    /// The catalog was fetched and parsed
    Loaded(Vec<Product>),
    /// The fetch failed; the payload is a human-readable reason
    Failed(String),
}

/// Spawns catalog fetches and collects their results
///
/// Each fetch is tagged with a generation number. Only the outcome of the most
/// recently spawned fetch is handed out; results of superseded fetches that
/// arrive late are dropped.
pub struct CatalogLoader {
    client: CatalogClient,
    generation: u64,
    sender: mpsc::Sender<(u64, CatalogMessage)>,
    receiver: mpsc::Receiver<(u64, CatalogMessage)>,
}

impl CatalogLoader {
    /// Creates a loader for `client`; nothing is fetched until `spawn_fetch`
    pub fn new(client: CatalogClient) -> Self {
        let (sender, receiver) = mpsc::channel(4);
        Self {
            client,
            generation: 0,
            sender,
            receiver,
        }
    }

    /// Starts one fetch on the runtime, superseding any fetch still in flight.
    /// No retry, no cancellation.
    pub fn spawn_fetch(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let client = self.client.clone();
        let tx = self.sender.clone();

        tokio::spawn(async move {
            let message = match client.fetch_products().await {
                Ok(products) => {
                    info!(url = client.url(), generation, count = products.len(), "catalog loaded");
                    CatalogMessage::Loaded(products)
                }
                Err(err) => {
                    error!(url = client.url(), generation, error = %err, "failed to fetch catalog");
                    CatalogMessage::Failed(err.to_string())
                }
            };
            let _ = tx.send((generation, message)).await;
        });
    }

    /// Checks for a finished fetch without blocking, skipping superseded results
    pub fn try_recv(&mut self) -> Option<CatalogMessage> {
        while let Ok((generation, message)) = self.receiver.try_recv() {
            if generation == self.generation {
                return Some(message);
            }
            debug!(generation, latest = self.generation, "dropping superseded catalog result");
        }
        None
    }
}
