//! Client SDK for the GigFlow freelance marketplace.
//!
//! This crate is the non-visual core a marketplace client builds on:
//!
//! - a [`store::Store`] facade with one async dispatch method per operation
//!   (auth, gigs, bids), each driving an idle → pending → succeeded/failed
//!   slice that consumers render from;
//! - a [`session::SessionManager`] holding the authenticated identity, with
//!   the credential persisted across restarts;
//! - a [`realtime::RealtimeClient`] for push notifications, activated when a
//!   session exists and torn down on logout;
//! - the [`backend::Backend`] trait describing the HTTP collaborator, with a
//!   reqwest implementation and a mockable seam for tests.
//!
//! The view layer is out of scope; `gigflow-cli` in this workspace is the
//! reference consumer.

pub mod backend;
pub mod error;
pub mod event;
pub mod policy;
pub mod realtime;
pub mod resource;
pub mod session;
pub mod store;
pub mod types;
pub mod validate;

pub use backend::{Backend, HireOutcome, HttpBackend, NewBid, NewGig};
pub use error::{Error, Result};
pub use event::Notification;
pub use realtime::RealtimeClient;
pub use resource::{ResourceState, Status};
pub use session::{SessionManager, SessionState};
pub use store::Store;
pub use types::{Bid, BidStatus, Gig, GigStatus, Session};
