//! Collaborator boundary: the REST backend behind an async trait.
//!
//! The trait is the seam tests mock; [`HttpBackend`] is the production
//! implementation speaking JSON over HTTP. Every response body is parsed
//! into an explicit struct right here — a shape mismatch becomes a
//! collaborator error instead of undefined fields drifting into slices.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Bid, Gig, Session};

/// Request body for posting a gig.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGig {
    pub title: String,
    pub description: String,
    pub budget: f64,
}

/// Request body for placing a bid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBid {
    pub gig_id: String,
    pub message: String,
    pub price: f64,
}

/// Joint result of hiring a bid: the closed gig plus the full post-hire bid
/// list for that gig (one hired, the rest rejected). Arrives in a single
/// response so the client can reflect the whole transition atomically.
#[derive(Debug, Clone, Deserialize)]
pub struct HireOutcome {
    pub gig: Gig,
    pub bids: Vec<Bid>,
}

/// Everything the client needs from the marketplace backend.
///
/// The server is authoritative for every rule the client also checks
/// (ownership, open/closed, one hire per gig); this trait only describes
/// the wire contract.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<Session>;
    async fn login(&self, email: &str, password: &str) -> Result<Session>;
    async fn logout(&self, token: &str) -> Result<()>;

    /// All open gigs, optionally filtered by a search term. Empty term
    /// lists everything.
    async fn list_gigs(&self, search: &str) -> Result<Vec<Gig>>;
    async fn get_gig(&self, id: &str) -> Result<Gig>;
    async fn create_gig(&self, token: &str, gig: NewGig) -> Result<Gig>;
    async fn my_gigs(&self, token: &str) -> Result<Vec<Gig>>;
    async fn delete_gig(&self, token: &str, id: &str) -> Result<()>;

    async fn create_bid(&self, token: &str, bid: NewBid) -> Result<Bid>;
    /// Bids on one gig; the server only answers this for the gig's owner.
    async fn bids_for_gig(&self, token: &str, gig_id: &str) -> Result<Vec<Bid>>;
    async fn my_bids(&self, token: &str) -> Result<Vec<Bid>>;
    async fn hire(&self, token: &str, bid_id: &str) -> Result<HireOutcome>;
}

/// Error body the backend sends on non-success responses.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP implementation of [`Backend`] using reqwest.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Turn a non-success response into a collaborator error, preferring
    /// the server-reported message when the error body parses.
    async fn reject(resp: reqwest::Response) -> Error {
        let status = resp.status();
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status.to_string(),
        };
        Error::Collaborator {
            status: status.as_u16(),
            message,
        }
    }

    async fn parse<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::reject(resp).await);
        }
        resp.json::<T>().await.map_err(|e| Error::Collaborator {
            status: status.as_u16(),
            message: format!("unexpected response shape: {e}"),
        })
    }

    async fn ack(resp: reqwest::Response) -> Result<()> {
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::reject(resp).await)
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        let resp = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let resp = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn logout(&self, token: &str) -> Result<()> {
        let resp = self
            .http
            .post(self.url("/api/auth/logout"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::ack(resp).await
    }

    async fn list_gigs(&self, search: &str) -> Result<Vec<Gig>> {
        let mut req = self.http.get(self.url("/api/gigs"));
        if !search.trim().is_empty() {
            req = req.query(&[("search", search)]);
        }
        Self::parse(req.send().await?).await
    }

    async fn get_gig(&self, id: &str) -> Result<Gig> {
        let resp = self.http.get(self.url(&format!("/api/gigs/{id}"))).send().await?;
        Self::parse(resp).await
    }

    async fn create_gig(&self, token: &str, gig: NewGig) -> Result<Gig> {
        let resp = self
            .http
            .post(self.url("/api/gigs"))
            .bearer_auth(token)
            .json(&gig)
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn my_gigs(&self, token: &str) -> Result<Vec<Gig>> {
        let resp = self
            .http
            .get(self.url("/api/gigs/mine"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn delete_gig(&self, token: &str, id: &str) -> Result<()> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/gigs/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::ack(resp).await
    }

    async fn create_bid(&self, token: &str, bid: NewBid) -> Result<Bid> {
        let resp = self
            .http
            .post(self.url("/api/bids"))
            .bearer_auth(token)
            .json(&bid)
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn bids_for_gig(&self, token: &str, gig_id: &str) -> Result<Vec<Bid>> {
        let resp = self
            .http
            .get(self.url(&format!("/api/bids/gig/{gig_id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn my_bids(&self, token: &str) -> Result<Vec<Bid>> {
        let resp = self
            .http
            .get(self.url("/api/bids/mine"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn hire(&self, token: &str, bid_id: &str) -> Result<HireOutcome> {
        let resp = self
            .http
            .put(self.url(&format!("/api/bids/{bid_id}/hire")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BidStatus, GigStatus};

    #[test]
    fn hire_outcome_parses_joint_response() {
        let json = r#"{
            "gig": {
                "id": "g1", "title": "Logo", "description": "A logo",
                "budget": 300.0, "ownerId": "u1", "status": "closed",
                "createdAt": "2026-01-10T12:00:00Z"
            },
            "bids": [
                {"id": "b1", "gigId": "g1", "freelancerId": "u2",
                 "message": "pick me", "price": 150.0, "status": "hired",
                 "createdAt": "2026-01-11T09:00:00Z"},
                {"id": "b2", "gigId": "g1", "freelancerId": "u3",
                 "message": "or me", "price": 200.0, "status": "rejected",
                 "createdAt": "2026-01-11T10:00:00Z"}
            ]
        }"#;
        let out: HireOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(out.gig.status, GigStatus::Closed);
        assert_eq!(out.bids[0].status, BidStatus::Hired);
        assert_eq!(out.bids[1].status, BidStatus::Rejected);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let b = HttpBackend::new("http://localhost:5000/");
        assert_eq!(b.url("/api/gigs"), "http://localhost:5000/api/gigs");
    }
}
