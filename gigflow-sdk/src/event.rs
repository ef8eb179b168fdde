//! Notifications pushed over the realtime channel for consumers to display.

use serde::Deserialize;

/// Events the realtime channel delivers to the consumer (CLI, GUI, bot).
///
/// Wire frames are newline-delimited JSON tagged by `type`; unknown frame
/// types are logged and skipped by the reader so a newer server never
/// breaks an older client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// Someone placed a bid on one of your gigs.
    #[serde(rename_all = "camelCase")]
    NewBid { gig_id: String, bid_id: String },

    /// One of your bids was hired.
    #[serde(rename_all = "camelCase")]
    Hired { gig_id: String, bid_id: String },

    /// A gig you bid on was closed (your bid was rejected or the gig ended).
    #[serde(rename_all = "camelCase")]
    GigClosed { gig_id: String },

    /// The channel dropped. Emitted locally by the reader, never by the
    /// server; reconnection is left to the consumer.
    #[serde(skip)]
    Disconnected { reason: String },
}
