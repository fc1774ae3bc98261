//! # Storefront Entry Point
//!
//! Command line front end over the storefront commands.
//!
//! ## Usage
//! ```bash
//! # Store details and opening hours
//! storefront info
//!
//! # Menu, optionally one category
//! storefront catalog --category barbecue
//!
//! # Full pickup order: sign in, fill the cart, pick a slot, pay, confirm
//! storefront demo --method pix --ignore-hours
//!
//! # Book a table
//! storefront reserve --date 2024-12-20 --time 19:30 --guests 12 --corporate
//!
//! # Admin dashboard over the seeded history
//! storefront admin --days 7
//! ```

use std::error::Error;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;

use delicia_core::admin::{DEFAULT_SALES_DAYS, MAX_SALES_DAYS};
use delicia_core::{Category, ClockTime, PaymentMethod, ReservationKind};
use storefront::commands::{admin, cart, catalog, checkout, config, reservation, session};
use storefront::state::ConfigState;
use storefront::{init_tracing, Storefront};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to storefront.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Store name, hours and open/closed status
    Info,

    /// List the menu
    Catalog {
        /// chicken, barbecue, side or dessert
        #[arg(long)]
        category: Option<Category>,
    },

    /// Place a sample pickup order end to end
    Demo {
        /// pix or card
        #[arg(long, default_value = "pix")]
        method: PaymentMethod,

        /// Pickup slot, HH:MM (first free slot when omitted)
        #[arg(long)]
        time: Option<String>,

        /// Allow checkout outside opening hours
        #[arg(long)]
        ignore_hours: bool,
    },

    /// Book a table as the demo customer
    Reserve {
        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,

        /// HH:MM
        #[arg(long)]
        time: ClockTime,

        #[arg(long, default_value_t = 2)]
        guests: u32,

        /// Corporate event instead of a family one
        #[arg(long)]
        corporate: bool,
    },

    /// Dashboard, orders and reservations
    Admin {
        /// Days on the sales chart (1-366)
        #[arg(
            long,
            default_value_t = DEFAULT_SALES_DAYS,
            value_parser = clap::value_parser!(u32).range(1..=MAX_SALES_DAYS as i64)
        )]
        days: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = ConfigState::load(cli.config)?;
    if let Command::Demo { ignore_hours: true, .. } = cli.command {
        config.enforce_store_hours = false;
    }

    info!(store = %config.store_name, "Starting storefront");
    let storefront = Storefront::bootstrap(config);
    let refresher = storefront.spawn_open_status_refresh();

    let result = match cli.command {
        Command::Info => print_info(&storefront),
        Command::Catalog { category } => print_catalog(&storefront, category),
        Command::Demo { method, time, .. } => run_demo(&storefront, method, time).await,
        Command::Reserve {
            date,
            time,
            guests,
            corporate,
        } => run_reserve(&storefront, date, time, guests, corporate).await,
        Command::Admin { days } => run_admin(&storefront, days).await,
    };

    refresher.abort();
    result
}

fn print_info(sf: &Storefront) -> Result<(), Box<dyn Error>> {
    let info = config::get_store_info(&sf.config, &sf.store, Local::now().naive_local());

    println!("{}", info.name);
    for line in &info.address {
        println!("  {}", line);
    }
    println!();
    println!("Pickups: {}", info.hours);
    match info.next_opening {
        None => println!("Status:  OPEN"),
        Some(next) => println!("Status:  closed, next opening {}", next),
    }
    Ok(())
}

fn print_catalog(sf: &Storefront, category: Option<Category>) -> Result<(), Box<dyn Error>> {
    let categories = match category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    for category in categories {
        println!("== {} ==", category);
        for product in catalog::list_products(Some(category)) {
            let flag = if product.is_orderable() { "" } else { "  (esgotado)" };
            println!(
                "  {:<20} {:<32} {:>12}{}",
                product.id,
                product.name,
                sf.config.format_currency(product.price.cents()),
                flag
            );
        }
        println!();
    }
    Ok(())
}

async fn run_demo(
    sf: &Storefront,
    method: PaymentMethod,
    time: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let user = session::login(&sf.store, &sf.login).await?;
    println!("✓ Signed in as {} <{}>", user.name, user.email);

    cart::add_to_cart(&sf.store, "frango-com-recheio", Some(1))?;
    cart::add_to_cart(&sf.store, "maionese", Some(2))?;
    let cart = cart::add_to_cart(&sf.store, "guarana", Some(1))?;
    println!(
        "✓ Cart: {} items, {}",
        cart.totals.item_count,
        sf.config.format_currency(cart.totals.total.cents())
    );

    let summary = checkout::begin_checkout(&sf.store, &sf.config, &sf.bookings)?;
    let time = match time {
        Some(time) => time,
        None => summary
            .slots
            .iter()
            .find(|slot| slot.is_bookable())
            .map(|slot| slot.time.to_string())
            .ok_or("no pickup slot has room left")?,
    };
    let pickup = checkout::select_pickup_time(&sf.store, &sf.config, &sf.bookings, &time)?;
    println!("✓ Pickup at {}", pickup);

    println!("… Processing {} payment", method);
    let outcome = checkout::pay(&sf.store, &sf.config, &sf.bookings, &sf.payments, method).await?;
    if let Some(pix) = &outcome.receipt.pix_payload {
        println!("  PIX copia e cola: {}", pix);
    }

    let order = checkout::finish_checkout(&sf.store)?;
    println!();
    println!("Pedido confirmado!");
    println!("  Order:       {}", order.id);
    println!("  Pickup code: {}", order.pickup_code);
    println!("  Pickup time: {}", order.pickup_time);
    println!("  Total:       {}", sf.config.format_currency(order.total.cents()));
    println!("  Status:      {}", order.status);
    Ok(())
}

async fn run_reserve(
    sf: &Storefront,
    date: NaiveDate,
    time: ClockTime,
    guests: u32,
    corporate: bool,
) -> Result<(), Box<dyn Error>> {
    session::login(&sf.store, &sf.login).await?;

    let mut request = reservation::reservation_form(&sf.store);
    request.date = Some(date);
    request.time = Some(time);
    request.guests = guests;
    if corporate {
        request.kind = ReservationKind::Corporate;
    }

    let today = Local::now().date_naive();
    let booked = reservation::submit_reservation(&sf.store, &sf.desk, request, today).await?;

    println!("✓ Reservation {} received", booked.id);
    println!("  {} at {} for {} guests ({:?})", booked.date, booked.time, booked.guests, booked.kind);
    println!("  Status: {}", booked.status);
    Ok(())
}

async fn run_admin(sf: &Storefront, days: u32) -> Result<(), Box<dyn Error>> {
    session::login(&sf.store, &sf.login).await?;

    let today = chrono::Utc::now().date_naive();
    let summary = admin::dashboard(&sf.store, today, days)?;

    println!("Revenue:      {}", sf.config.format_currency(summary.total_revenue.cents()));
    println!("Orders:       {}", summary.total_orders);
    println!("Reservations: {}", summary.total_reservations);
    println!();
    println!("Sales, last {} days", days);
    for day in &summary.sales_by_day {
        println!(
            "  {}  {:>3} orders  {:>14}",
            day.label,
            day.orders,
            sf.config.format_currency(day.total.cents())
        );
    }

    println!();
    println!("Orders (newest first)");
    for order in admin::list_orders(&sf.store)? {
        println!(
            "  {}  {:<10} {:<20} {:>12}",
            order.id,
            order.status.to_string(),
            order.customer_name,
            sf.config.format_currency(order.total.cents())
        );
    }

    println!();
    println!("Reservations (newest first)");
    for r in admin::list_reservations(&sf.store)? {
        println!(
            "  {}  {:<10} {} {}  {:>2} guests  {}",
            r.id,
            r.status.to_string(),
            r.date,
            r.time,
            r.guests,
            r.name
        );
    }
    Ok(())
}
