//! Store facade: one dispatch method per marketplace operation.
//!
//! The store owns the session manager, the gig and bid slices, and the
//! realtime client. Consumers read slice state through the accessors and
//! communicate intent solely by calling a dispatch method; slices are never
//! mutated from outside. Each dispatch flips its slice to pending before the
//! first await, issues exactly one backend call, and applies the outcome.
//!
//! Validation failures and calls that need a session while anonymous return
//! early without touching slice state — the network is never contacted.

use crate::backend::{Backend, HireOutcome, NewBid, NewGig};
use crate::error::{Error, Result};
use crate::realtime::RealtimeClient;
use crate::resource::ResourceState;
use crate::session::SessionManager;
use crate::types::{Bid, Gig, Session};
use crate::validate;

pub struct Store<B: Backend> {
    backend: B,
    session: SessionManager,
    realtime: RealtimeClient,
    auth: ResourceState<Session>,
    gigs: ResourceState<Gig>,
    bids: ResourceState<Bid>,
}

impl<B: Backend> Store<B> {
    pub fn new(backend: B, session: SessionManager, realtime: RealtimeClient) -> Self {
        let mut auth = ResourceState::new();
        if let Some(s) = session.session() {
            // A persisted session restored by the manager shows up in the
            // auth slice too, so consumers see a consistent picture.
            auth.complete_current(s.clone());
            auth.reset();
        }
        Self {
            backend,
            session,
            realtime,
            auth,
            gigs: ResourceState::new(),
            bids: ResourceState::new(),
        }
    }

    /// Bring up the realtime channel for a session restored from disk.
    /// Call once at startup; a no-op while anonymous.
    pub async fn restore(&mut self) {
        if self.session.is_authenticated() {
            self.activate_realtime().await;
        }
    }

    // ── read-only state access ──

    pub fn auth(&self) -> &ResourceState<Session> {
        &self.auth
    }

    pub fn gigs(&self) -> &ResourceState<Gig> {
        &self.gigs
    }

    pub fn bids(&self) -> &ResourceState<Bid> {
        &self.bids
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn realtime(&self) -> &RealtimeClient {
        &self.realtime
    }

    /// Acknowledge a consumed terminal status on the auth slice.
    pub fn reset_auth(&mut self) {
        self.auth.reset();
    }

    pub fn reset_gigs(&mut self) {
        self.gigs.reset();
    }

    pub fn reset_bids(&mut self) {
        self.bids.reset();
    }

    // ── auth ──

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<()> {
        validate::register(name, email, password, confirm)?;
        self.begin_auth_dispatch().await;
        tracing::debug!(email, "dispatch: register");
        match self.backend.register(name, email, password).await {
            Ok(s) => self.finish_auth(s).await,
            Err(e) => self.fail_auth(e),
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        validate::login(email, password)?;
        self.begin_auth_dispatch().await;
        tracing::debug!(email, "dispatch: login");
        match self.backend.login(email, password).await {
            Ok(s) => self.finish_auth(s).await,
            Err(e) => self.fail_auth(e),
        }
    }

    /// Clears the session and its persisted credential and tears down the
    /// realtime channel. A failed logout call still logs out locally.
    pub async fn logout(&mut self) -> Result<()> {
        if let Some(s) = self.session.session()
            && let Err(e) = self.backend.logout(&s.token).await
        {
            tracing::warn!(error = %e, "logout call failed, clearing session anyway");
        }
        self.session.clear();
        self.realtime.deactivate().await;
        self.auth.clear_current();
        self.auth.reset();
        tracing::debug!("session cleared");
        Ok(())
    }

    /// Start a login/register dispatch. Re-authenticating while a session
    /// is live means switching accounts: the old credential file, realtime
    /// connection, and auth slice are dropped first, so a failure leaves
    /// the client fully anonymous instead of half logged out (a stale
    /// credential file would resurrect the old session on restart).
    async fn begin_auth_dispatch(&mut self) {
        if self.session.is_authenticated() {
            self.session.clear();
            self.realtime.deactivate().await;
            self.auth.clear_current();
        }
        self.auth.begin();
        self.session.begin_auth();
    }

    async fn finish_auth(&mut self, session: Session) -> Result<()> {
        self.session.complete_auth(session.clone());
        self.auth.complete_current(session);
        self.activate_realtime().await;
        Ok(())
    }

    fn fail_auth(&mut self, e: Error) -> Result<()> {
        self.session.fail_auth();
        self.auth.fail(e.to_string());
        Err(e)
    }

    // ── gigs ──

    /// Fetch all open gigs; `search` empty lists everything.
    pub async fn fetch_gigs(&mut self, search: &str) -> Result<()> {
        self.gigs.begin();
        tracing::debug!(search, "dispatch: fetch gigs");
        match self.backend.list_gigs(search).await {
            Ok(gigs) => {
                self.gigs.complete_replace(gigs);
                Ok(())
            }
            Err(e) => {
                self.gigs.fail(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn fetch_gig(&mut self, id: &str) -> Result<()> {
        self.gigs.begin();
        tracing::debug!(id, "dispatch: fetch gig");
        match self.backend.get_gig(id).await {
            Ok(gig) => {
                self.gigs.complete_current(gig);
                Ok(())
            }
            Err(e) => {
                self.gigs.fail(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn create_gig(&mut self, title: &str, description: &str, budget: f64) -> Result<()> {
        validate::new_gig(title, description, budget)?;
        let token = self.token()?;
        self.gigs.begin();
        tracing::debug!(title, "dispatch: create gig");
        let gig = NewGig {
            title: title.to_string(),
            description: description.to_string(),
            budget,
        };
        match self.backend.create_gig(&token, gig).await {
            Ok(created) => {
                self.gigs.complete_append(created);
                Ok(())
            }
            Err(e) => {
                self.gigs.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch the gigs owned by the current user (replaces the list).
    pub async fn fetch_my_gigs(&mut self) -> Result<()> {
        let token = self.token()?;
        self.gigs.begin();
        tracing::debug!("dispatch: fetch my gigs");
        match self.backend.my_gigs(&token).await {
            Ok(gigs) => {
                self.gigs.complete_replace(gigs);
                Ok(())
            }
            Err(e) => {
                self.gigs.fail(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn delete_gig(&mut self, id: &str) -> Result<()> {
        let token = self.token()?;
        self.gigs.begin();
        tracing::debug!(id, "dispatch: delete gig");
        match self.backend.delete_gig(&token, id).await {
            Ok(()) => {
                self.gigs.complete_remove(|g| g.id == id);
                Ok(())
            }
            Err(e) => {
                self.gigs.fail(e.to_string());
                Err(e)
            }
        }
    }

    // ── bids ──

    pub async fn place_bid(&mut self, gig_id: &str, message: &str, price: f64) -> Result<()> {
        validate::new_bid(message, price)?;
        let token = self.token()?;
        self.bids.begin();
        tracing::debug!(gig_id, "dispatch: place bid");
        let bid = NewBid {
            gig_id: gig_id.to_string(),
            message: message.to_string(),
            price,
        };
        match self.backend.create_bid(&token, bid).await {
            Ok(created) => {
                self.bids.complete_append(created);
                Ok(())
            }
            Err(e) => {
                self.bids.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch the bids on one gig. Owner-only on the server side.
    pub async fn fetch_bids_for_gig(&mut self, gig_id: &str) -> Result<()> {
        let token = self.token()?;
        self.bids.begin();
        tracing::debug!(gig_id, "dispatch: fetch bids for gig");
        match self.backend.bids_for_gig(&token, gig_id).await {
            Ok(bids) => {
                self.bids.complete_replace(bids);
                Ok(())
            }
            Err(e) => {
                self.bids.fail(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn fetch_my_bids(&mut self) -> Result<()> {
        let token = self.token()?;
        self.bids.begin();
        tracing::debug!("dispatch: fetch my bids");
        match self.backend.my_bids(&token).await {
            Ok(bids) => {
                self.bids.complete_replace(bids);
                Ok(())
            }
            Err(e) => {
                self.bids.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Hire a bid. The backend closes the gig and rejects the sibling bids
    /// in the same call; both slices are updated from that one response with
    /// no await in between, so no intermediate state is observable.
    pub async fn hire(&mut self, bid_id: &str) -> Result<()> {
        let token = self.token()?;
        self.bids.begin();
        self.gigs.begin();
        tracing::debug!(bid_id, "dispatch: hire");
        match self.backend.hire(&token, bid_id).await {
            Ok(HireOutcome { gig, bids }) => {
                self.bids.complete_replace(bids);
                self.gigs.complete_with(|items, current| {
                    if let Some(cur) = current.as_mut()
                        && cur.id == gig.id
                    {
                        *cur = gig.clone();
                    }
                    if let Some(slot) = items.iter_mut().find(|g| g.id == gig.id) {
                        *slot = gig.clone();
                    }
                });
                Ok(())
            }
            Err(e) => {
                self.bids.fail(e.to_string());
                self.gigs.fail(e.to_string());
                Err(e)
            }
        }
    }

    // ── helpers ──

    fn token(&self) -> Result<String> {
        self.session
            .session()
            .map(|s| s.token.clone())
            .ok_or(Error::NotAuthenticated)
    }

    async fn activate_realtime(&mut self) {
        let Some(user_id) = self.session.session().map(|s| s.user_id.clone()) else {
            return;
        };
        if let Err(e) = self.realtime.activate(&user_id).await {
            // Not user-fatal: the marketplace works without live updates.
            tracing::warn!(error = %e, "realtime activation failed, continuing without notifications");
        }
    }
}
