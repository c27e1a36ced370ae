use std::sync::Arc;
use std::time::Duration;

use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use availability_cell::slots::{bookable_dates, DEFAULT_BOOKING_WINDOW_DAYS};
use booking_cell::BookingCache;
use doctor_cell::DoctorRoster;
use navigation_cell::{chrome_for, redirect_for, LANDING};
use profile_cell::ProfileCache;
use session_cell::{ProfileRefresher, SessionStore, SessionSync};
use shared_api::ApiClient;
use shared_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareSync client");

    let config = AppConfig::from_env();
    let api = Arc::new(ApiClient::new(&config)?);

    let session = Arc::new(SessionStore::new(Arc::clone(&api), &config));
    let profiles: Arc<ProfileCache> = Arc::new(ProfileCache::new(Arc::clone(&api), &config));
    let roster = DoctorRoster::new(Arc::clone(&api), &config);
    let bookings = BookingCache::new(Arc::clone(&api));

    // Dependent caches follow session transitions from here on.
    let sync = SessionSync::new(
        Arc::clone(&session),
        Arc::clone(&profiles) as Arc<dyn ProfileRefresher>,
    )
    .spawn();

    // Rehydrate the persisted session before anything can observe the store,
    // so a logged-in user never flashes the guest view.
    session.bootstrap();

    let identity = session.identity();
    match &identity {
        Some(identity) => {
            info!("Signed in as {} ({})", identity.email, identity.role);
            if let Some(destination) = redirect_for(Some(identity), LANDING) {
                info!("Routing to {}", destination);
            }
        }
        None => info!("Browsing as guest"),
    }
    info!("Navigation chrome: {:?}", chrome_for(identity.as_ref()));

    match roster.fetch_all().await {
        Ok(doctors) => info!("{} doctors available", doctors.len()),
        Err(e) => warn!("Doctor roster unavailable: {}", e),
    }

    if identity.is_some() {
        match bookings.fetch_mine().await {
            Ok(list) => info!("{} bookings on record", list.len()),
            Err(e) => warn!("Bookings unavailable: {}", e),
        }
    }

    let window: Vec<String> = bookable_dates(DEFAULT_BOOKING_WINDOW_DAYS)
        .map(|d| d.full_date)
        .collect();
    if let (Some(first), Some(last)) = (window.first(), window.last()) {
        info!("Bookable window: {} through {}", first, last);
    }

    // Give the background identity re-verification a moment to land before
    // the tour ends; its result applies opportunistically either way.
    tokio::time::sleep(Duration::from_millis(300)).await;
    sync.abort();

    Ok(())
}
