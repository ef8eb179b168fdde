//! Ownership-gated action predicates.
//!
//! These gate which mutating actions a consumer may dispatch. They are not
//! a trust boundary — the server re-enforces every one of them; the client
//! only uses them to avoid offering actions that would be refused.

use crate::types::{Bid, BidStatus, Gig, GigStatus};

/// The owner, and only the owner, may edit or delete a gig.
pub fn can_manage(gig: &Gig, user_id: &str) -> bool {
    gig.owner_id == user_id
}

/// Anyone except the owner may bid, and only while the gig is open.
pub fn can_bid(gig: &Gig, user_id: &str) -> bool {
    gig.owner_id != user_id && gig.status == GigStatus::Open
}

/// A bid can be hired while it is still pending and its gig is still open.
pub fn can_hire(bid: &Bid, gig: &Gig) -> bool {
    bid.status == BidStatus::Pending && gig.status == GigStatus::Open
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn gig(owner: &str, status: GigStatus) -> Gig {
        Gig {
            id: "g1".into(),
            title: "Build a site".into(),
            description: "A small site".into(),
            budget: 500.0,
            owner_id: owner.into(),
            status,
            created_at: Utc::now(),
        }
    }

    fn bid(status: BidStatus) -> Bid {
        Bid {
            id: "b1".into(),
            gig_id: "g1".into(),
            freelancer_id: "u2".into(),
            message: "I can build this".into(),
            price: 400.0,
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_manages_but_cannot_bid() {
        let g = gig("u1", GigStatus::Open);
        assert!(can_manage(&g, "u1"));
        assert!(!can_bid(&g, "u1"));
        assert!(!can_manage(&g, "u2"));
        assert!(can_bid(&g, "u2"));
    }

    #[test]
    fn closed_gig_takes_no_bids() {
        let g = gig("u1", GigStatus::Closed);
        assert!(!can_bid(&g, "u2"));
    }

    #[test]
    fn hire_needs_pending_bid_and_open_gig() {
        assert!(can_hire(&bid(BidStatus::Pending), &gig("u1", GigStatus::Open)));
        assert!(!can_hire(&bid(BidStatus::Hired), &gig("u1", GigStatus::Open)));
        assert!(!can_hire(&bid(BidStatus::Rejected), &gig("u1", GigStatus::Open)));
        assert!(!can_hire(&bid(BidStatus::Pending), &gig("u1", GigStatus::Closed)));
    }
}
