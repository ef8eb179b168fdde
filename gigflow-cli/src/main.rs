//! gigflow: command-line client for the GigFlow marketplace.
//!
//! One subcommand per marketplace operation, dispatched through the SDK
//! store. The session credential is persisted under the user config dir, so
//! `gigflow login` once and subsequent commands run authenticated. `watch`
//! keeps the process alive and prints realtime notifications.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gigflow_sdk::backend::HttpBackend;
use gigflow_sdk::session::SessionManager;
use gigflow_sdk::store::Store;
use gigflow_sdk::types::{Bid, Gig};
use gigflow_sdk::{Notification, RealtimeClient};

#[derive(Parser)]
#[command(name = "gigflow", about = "CLI client for the GigFlow marketplace")]
struct Args {
    /// Backend base URL
    #[arg(long, env = "GIGFLOW_API_URL", default_value = "http://127.0.0.1:5000")]
    api_url: String,

    /// Realtime notification endpoint (host:port)
    #[arg(long, env = "GIGFLOW_SOCKET_ADDR", default_value = "127.0.0.1:7070")]
    socket_addr: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account and sign in
    Register {
        name: String,
        email: String,
        password: String,
        /// Repeat the password
        confirm: String,
    },
    /// Sign in
    Login { email: String, password: String },
    /// Sign out and drop the saved credential
    Logout,
    /// Browse open gigs, optionally filtered
    Gigs {
        #[arg(default_value = "")]
        search: String,
    },
    /// Show one gig
    Gig { id: String },
    /// Post a new gig
    PostGig {
        title: String,
        description: String,
        budget: f64,
    },
    /// List gigs you own
    MyGigs,
    /// Delete a gig you own
    DeleteGig { id: String },
    /// Place a bid on a gig
    Bid {
        gig_id: String,
        message: String,
        price: f64,
    },
    /// List the bids on a gig you own
    Bids { gig_id: String },
    /// List your bids
    MyBids,
    /// Hire a bid (closes the gig, rejects the others)
    Hire { bid_id: String },
    /// Stay connected and print realtime notifications
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gigflow=info".into()),
        )
        .init();

    let args = Args::parse();
    tracing::debug!(api_url = %args.api_url, socket_addr = %args.socket_addr, "starting gigflow client");

    let backend = HttpBackend::new(args.api_url);
    let session = SessionManager::open();
    let (realtime, mut notifications) = RealtimeClient::new(args.socket_addr);
    let mut store = Store::new(backend, session, realtime);

    match args.command {
        Command::Register {
            name,
            email,
            password,
            confirm,
        } => {
            store.register(&name, &email, &password, &confirm).await?;
            if let Some(s) = store.auth().current() {
                println!("Account created. Signed in as {} <{}>", s.name, s.email);
            }
        }
        Command::Login { email, password } => {
            store.login(&email, &password).await?;
            if let Some(s) = store.auth().current() {
                println!("Welcome back, {}", s.name);
            }
        }
        Command::Logout => {
            store.logout().await?;
            println!("Logged out");
        }
        Command::Gigs { search } => {
            store.fetch_gigs(&search).await?;
            print_gigs(store.gigs().items());
        }
        Command::Gig { id } => {
            store.fetch_gig(&id).await?;
            if let Some(g) = store.gigs().current() {
                println!("{} — {} (${}, {:?})", g.id, g.title, g.budget, g.status);
                println!("posted by {} on {}", g.owner_id, g.created_at.date_naive());
                println!("\n{}", g.description);
            }
        }
        Command::PostGig {
            title,
            description,
            budget,
        } => {
            store.create_gig(&title, &description, budget).await?;
            println!("Gig posted: {title}");
        }
        Command::MyGigs => {
            store.fetch_my_gigs().await?;
            print_gigs(store.gigs().items());
        }
        Command::DeleteGig { id } => {
            store.delete_gig(&id).await?;
            println!("Gig {id} deleted");
        }
        Command::Bid {
            gig_id,
            message,
            price,
        } => {
            store.place_bid(&gig_id, &message, price).await?;
            println!("Bid placed on {gig_id} for ${price}");
        }
        Command::Bids { gig_id } => {
            store.fetch_bids_for_gig(&gig_id).await?;
            print_bids(store.bids().items());
        }
        Command::MyBids => {
            store.fetch_my_bids().await?;
            print_bids(store.bids().items());
        }
        Command::Hire { bid_id } => {
            store.hire(&bid_id).await?;
            println!("Hired {bid_id}; gig closed and remaining bids rejected");
        }
        Command::Watch => {
            store.restore().await;
            if !store.realtime().is_connected() {
                anyhow::bail!("not connected — log in first and check --socket-addr");
            }
            println!("Watching for notifications (ctrl-c to stop)...");
            while let Some(n) = notifications.recv().await {
                match n {
                    Notification::NewBid { gig_id, bid_id } => {
                        println!("new bid {bid_id} on your gig {gig_id}");
                    }
                    Notification::Hired { gig_id, bid_id } => {
                        println!("your bid {bid_id} on {gig_id} was hired!");
                    }
                    Notification::GigClosed { gig_id } => {
                        println!("gig {gig_id} was closed");
                    }
                    Notification::Disconnected { reason } => {
                        tracing::warn!(%reason, "realtime channel dropped");
                        println!("disconnected: {reason}");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_gigs(gigs: &[Gig]) {
    if gigs.is_empty() {
        println!("no gigs");
        return;
    }
    for g in gigs {
        println!(
            "{}  {:<40}  ${:<8}  {:?}  (owner {})",
            g.id, g.title, g.budget, g.status, g.owner_id
        );
    }
}

fn print_bids(bids: &[Bid]) {
    if bids.is_empty() {
        println!("no bids");
        return;
    }
    for b in bids {
        println!(
            "{}  gig {}  ${:<8}  {:?}  \"{}\"",
            b.id, b.gig_id, b.price, b.status, b.message
        );
    }
}
