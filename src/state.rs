use std::{sync::Arc, time::Instant};

use crate::{
    config::AppConfig,
    contact::{ContactRepo, PgContactRepo},
    db::Database,
    donations::{
        payments::{PaymentGateway, RazorpayClient},
        DonationRepo, PgDonationRepo,
    },
    events::{EventRepo, PgEventRepo},
    registrations::{PgRegistrationRepo, RegistrationRepo},
    storage::{Storage, StorageClient},
    team::{PgTeamRepo, TeamRepo},
    users::{PgUserRepo, UserRepo},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub donations: Arc<dyn DonationRepo>,
    pub contacts: Arc<dyn ContactRepo>,
    pub events: Arc<dyn EventRepo>,
    pub users: Arc<dyn UserRepo>,
    pub team: Arc<dyn TeamRepo>,
    pub registrations: Arc<dyn RegistrationRepo>,
    pub storage: Arc<dyn StorageClient>,
    pub payments: Arc<dyn PaymentGateway>,
    pub started_at: Instant,
}

impl AppState {
    pub async fn init(config: AppConfig, db: &Database) -> anyhow::Result<Self> {
        let storage = Arc::new(Storage::new(&config.storage).await?) as Arc<dyn StorageClient>;
        let payments =
            Arc::new(RazorpayClient::new(config.payment.clone())?) as Arc<dyn PaymentGateway>;
        let pool = db.pool().clone();

        Ok(Self {
            config: Arc::new(config),
            donations: Arc::new(PgDonationRepo::new(pool.clone())),
            contacts: Arc::new(PgContactRepo::new(pool.clone())),
            events: Arc::new(PgEventRepo::new(pool.clone())),
            users: Arc::new(PgUserRepo::new(pool.clone())),
            team: Arc::new(PgTeamRepo::new(pool.clone())),
            registrations: Arc::new(PgRegistrationRepo::new(pool)),
            storage,
            payments,
            started_at: Instant::now(),
        })
    }
}
