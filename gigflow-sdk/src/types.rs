//! Domain model shared by the slices, the backend client, and consumers.
//!
//! Everything that crosses the wire is a typed struct with serde derives;
//! responses are parsed at the boundary and a shape mismatch surfaces as a
//! collaborator error instead of leaking into consumer state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a posted gig. A gig only ever moves `Open` → `Closed`
/// (hiring closes it); there is no reopen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GigStatus {
    Open,
    Closed,
}

/// Lifecycle of a bid. `Pending` is the only non-terminal state; once a bid
/// is `Hired` or `Rejected` it never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    Pending,
    Hired,
    Rejected,
}

/// A posted project awaiting bids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gig {
    pub id: String,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub owner_id: String,
    pub status: GigStatus,
    pub created_at: DateTime<Utc>,
}

/// A freelancer's proposal against one gig. References gig and freelancer
/// by id only; no ownership.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: String,
    pub gig_id: String,
    pub freelancer_id: String,
    pub message: String,
    pub price: f64,
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
}

/// The authenticated user's identity plus the bearer credential used for
/// owner-scoped calls. One per running client; persisted across restarts
/// by the session manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}
