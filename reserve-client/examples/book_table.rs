//! Books a table end to end.
//!
//! ```text
//! RESERVE_API_URL=https://host/api \
//! RESERVE_EMAIL=guest@example.com RESERVE_PASSWORD=secret \
//! cargo run -p reserve-client --example book_table -- 12 2025-01-20 4
//! ```

use anyhow::{Context, bail};
use chrono::NaiveDate;
use reserve_client::{ClientConfig, DraftForm, ReserveClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let restaurant_id: i64 = args
        .next()
        .context("usage: book_table <restaurant-id> <YYYY-MM-DD> [people]")?
        .parse()
        .context("restaurant id must be a number")?;
    let date: NaiveDate = args
        .next()
        .context("missing date")?
        .parse()
        .context("date must be YYYY-MM-DD")?;
    let people: u32 = match args.next() {
        Some(p) => p.parse().context("people must be a number")?,
        None => 2,
    };

    let config = ClientConfig::from_env();
    let client = ReserveClient::new(config.clone())?;

    let email = std::env::var("RESERVE_EMAIL").context("RESERVE_EMAIL is not set")?;
    let password = std::env::var("RESERVE_PASSWORD").context("RESERVE_PASSWORD is not set")?;
    let user = client.login(&email, &password).await?;
    tracing::info!(user = %user.email, "Signed in");

    let restaurant = client.restaurant(restaurant_id).await?;
    let mut form = DraftForm::for_restaurant(&restaurant, &config);
    form.set_date(Some(date));
    form.set_people(people);

    let slots = form.slots().to_vec();
    if slots.is_empty() {
        bail!("{} is closed on {date}", restaurant.name);
    }
    println!("{} on {date}:", restaurant.name);

    for slot in &slots {
        form.select_slot(slot);
        let Some(availability) = form.refresh_availability(&client).await? else {
            continue;
        };
        println!("  {}  {}", slot.label, availability.summary());
        if !availability.can_seat(people) || !form.can_submit() {
            continue;
        }

        match form.submit(&client).await {
            Ok(reservation) => {
                println!(
                    "Booked #{} at {} for {} ({})",
                    reservation.id, reservation.time, reservation.people, reservation.status
                );
                return Ok(());
            }
            Err(e) => tracing::warn!(slot = %slot.value, error = %e, "Slot not booked"),
        }
    }

    bail!("no slot could seat {people} on {date}")
}
