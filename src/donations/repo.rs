use std::{fmt, str::FromStr};

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Created,
    Paid,
    Failed,
}

impl DonationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DonationStatus::Created => "created",
            DonationStatus::Paid => "paid",
            DonationStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(DonationStatus::Created),
            "paid" => Ok(DonationStatus::Paid),
            "failed" => Ok(DonationStatus::Failed),
            other => anyhow::bail!("unknown donation status {other:?}"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub pan: Option<String>,
    /// Whole currency units.
    pub amount: i64,
    pub currency: String,
    pub order_id: String,
    pub payment_id: Option<String>,
    pub status: DonationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, FromRow)]
struct DonationRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    pan: Option<String>,
    amount: i64,
    currency: String,
    order_id: String,
    payment_id: Option<String>,
    status: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<DonationRow> for Donation {
    type Error = anyhow::Error;

    fn try_from(r: DonationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: r.status.parse()?,
            id: r.id,
            name: r.name,
            email: r.email,
            phone: r.phone,
            address: r.address,
            pan: r.pan,
            amount: r.amount,
            currency: r.currency,
            order_id: r.order_id,
            payment_id: r.payment_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewDonation {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub pan: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub order_id: String,
}

#[async_trait]
pub trait DonationRepo: Send + Sync {
    async fn insert(&self, new: NewDonation) -> anyhow::Result<Donation>;
    async fn find_by_order(&self, order_id: &str) -> anyhow::Result<Option<Donation>>;
    /// Paid donations are final: returns `None` for them and for unknown orders.
    async fn set_status(
        &self,
        order_id: &str,
        status: DonationStatus,
        payment_id: Option<String>,
    ) -> anyhow::Result<Option<Donation>>;
    async fn list(&self) -> anyhow::Result<Vec<Donation>>;
}

pub struct PgDonationRepo {
    db: PgPool,
}

impl PgDonationRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const COLUMNS: &str = "id, name, email, phone, address, pan, amount, currency, order_id, \
                       payment_id, status, created_at, updated_at";

#[async_trait]
impl DonationRepo for PgDonationRepo {
    async fn insert(&self, new: NewDonation) -> anyhow::Result<Donation> {
        let row = sqlx::query_as::<_, DonationRow>(&format!(
            r#"
            INSERT INTO donations (id, name, email, phone, address, pan, amount, currency, order_id, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new.name)
        .bind(new.email)
        .bind(new.phone)
        .bind(new.address)
        .bind(new.pan)
        .bind(new.amount)
        .bind(new.currency)
        .bind(new.order_id)
        .bind(DonationStatus::Created.as_str())
        .fetch_one(&self.db)
        .await?;
        row.try_into()
    }

    async fn find_by_order(&self, order_id: &str) -> anyhow::Result<Option<Donation>> {
        let row = sqlx::query_as::<_, DonationRow>(&format!(
            "SELECT {COLUMNS} FROM donations WHERE order_id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?;
        row.map(Donation::try_from).transpose()
    }

    async fn set_status(
        &self,
        order_id: &str,
        status: DonationStatus,
        payment_id: Option<String>,
    ) -> anyhow::Result<Option<Donation>> {
        let row = sqlx::query_as::<_, DonationRow>(&format!(
            r#"
            UPDATE donations
               SET status = $2,
                   payment_id = COALESCE($3, payment_id),
                   updated_at = now()
             WHERE order_id = $1 AND status <> 'paid'
            RETURNING {COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(status.as_str())
        .bind(payment_id)
        .fetch_optional(&self.db)
        .await?;
        row.map(Donation::try_from).transpose()
    }

    async fn list(&self) -> anyhow::Result<Vec<Donation>> {
        let rows = sqlx::query_as::<_, DonationRow>(&format!(
            "SELECT {COLUMNS} FROM donations ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;
        rows.into_iter().map(Donation::try_from).collect()
    }
}
