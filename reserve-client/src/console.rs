//! Owner assignment console
//!
//! Reservations and tables of one restaurant, loaded together. Every change
//! (status, table link, table edit) is sent to the service and followed by
//! a full reload; the console never patches its snapshot by hand. When a
//! change fails, the previous snapshot stays as it was.

use shared::models::{
    Actor, DiningTable, DiningTableCreate, DiningTableUpdate, Reservation, ReservationFilter,
    ReservationStatus,
};

use crate::api::ReserveClient;
use crate::error::{ClientError, ClientResult};
use crate::scope::RequestScope;

#[derive(Debug)]
pub struct OwnerConsole {
    client: ReserveClient,
    restaurant_id: i64,
    filter: ReservationFilter,
    reservations: Vec<Reservation>,
    tables: Vec<DiningTable>,
    scope: RequestScope,
}

impl OwnerConsole {
    pub fn new(client: ReserveClient, restaurant_id: i64) -> Self {
        Self {
            client,
            restaurant_id,
            filter: ReservationFilter::default(),
            reservations: Vec::new(),
            tables: Vec::new(),
            scope: RequestScope::new(),
        }
    }

    /// Creates the console and loads its first snapshot
    pub async fn open(client: ReserveClient, restaurant_id: i64) -> ClientResult<Self> {
        let mut console = Self::new(client, restaurant_id);
        console.reload().await?;
        Ok(console)
    }

    pub fn restaurant_id(&self) -> i64 {
        self.restaurant_id
    }

    pub fn filter(&self) -> &ReservationFilter {
        &self.filter
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn reservation(&self, id: i64) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    pub fn tables(&self) -> &[DiningTable] {
        &self.tables
    }

    /// Tables offered for manual assignment
    pub fn assignable_tables(&self) -> Vec<&DiningTable> {
        self.tables.iter().filter(|t| t.is_active).collect()
    }

    async fn actor(&self) -> ClientResult<Actor> {
        let user = self.client.session().require_user().await?;
        if user.is_admin() {
            Ok(Actor::Admin)
        } else if user.is_owner() {
            Ok(Actor::Owner)
        } else {
            Err(ClientError::Forbidden("restaurant owner role required".into()))
        }
    }

    /// Loads reservations and tables; either both land or neither does
    pub async fn reload(&mut self) -> ClientResult<()> {
        self.actor().await?;
        let client = &self.client;
        let id = self.restaurant_id;
        let filter = &self.filter;
        let (reservations, tables) = self
            .scope
            .run(async {
                tokio::try_join!(client.panel_reservations(id, filter), client.panel_tables(id))
            })
            .await?;
        tracing::debug!(
            restaurant_id = id,
            reservations = reservations.len(),
            tables = tables.len(),
            "Console reloaded"
        );
        self.reservations = reservations;
        self.tables = tables;
        Ok(())
    }

    pub async fn apply_filter(&mut self, filter: ReservationFilter) -> ClientResult<()> {
        self.filter = filter;
        self.reload().await
    }

    // ========== Reservations ==========

    pub async fn set_status(
        &mut self,
        reservation_id: i64,
        status: ReservationStatus,
    ) -> ClientResult<()> {
        let actor = self.actor().await?;
        let current = self
            .reservation(reservation_id)
            .map(|r| r.status)
            .ok_or_else(|| ClientError::NotFound(format!("reservation {reservation_id}")))?;
        if !current.can_transition(status, actor) {
            return Err(ClientError::NotAllowed(format!("{current} -> {status}")));
        }
        self.client
            .set_reservation_status(self.restaurant_id, reservation_id, status)
            .await?;
        self.reload().await
    }

    pub async fn assign_table(&mut self, reservation_id: i64, table_id: i64) -> ClientResult<()> {
        if !self.assignable_tables().iter().any(|t| t.id == table_id) {
            return Err(ClientError::NotAllowed(format!(
                "table {table_id} is not available for assignment"
            )));
        }
        self.client
            .assign_table(self.restaurant_id, reservation_id, table_id)
            .await?;
        self.reload().await
    }

    pub async fn unassign_table(&mut self, reservation_id: i64, table_id: i64) -> ClientResult<()> {
        self.client
            .unassign_table(self.restaurant_id, reservation_id, table_id)
            .await?;
        self.reload().await
    }

    // ========== Tables ==========

    pub async fn create_table(&mut self, table: DiningTableCreate) -> ClientResult<()> {
        self.client.create_table(self.restaurant_id, &table).await?;
        self.reload().await
    }

    pub async fn update_table(&mut self, table_id: i64, update: DiningTableUpdate) -> ClientResult<()> {
        self.client
            .update_table(self.restaurant_id, table_id, &update)
            .await?;
        self.reload().await
    }

    /// Activates an inactive table or deactivates an active one
    pub async fn toggle_table(&mut self, table_id: i64) -> ClientResult<()> {
        let is_active = self
            .tables
            .iter()
            .find(|t| t.id == table_id)
            .map(|t| t.is_active)
            .ok_or_else(|| ClientError::NotFound(format!("table {table_id}")))?;
        self.update_table(table_id, DiningTableUpdate::active(!is_active))
            .await
    }
}
