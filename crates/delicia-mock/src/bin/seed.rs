//! # Seed Data Generator
//!
//! Prints a mock order history and reservation list as JSON.
//!
//! ## Usage
//! ```bash
//! # 15 orders, 8 reservations, random seed
//! cargo run -p delicia-mock --bin seed
//!
//! # Reproducible fixture
//! cargo run -p delicia-mock --bin seed -- --orders 30 --reservations 10 --seed 42 > fixture.json
//! ```
//!
//! The JSON goes to stdout; progress lines go to stderr so the output can be
//! redirected straight into a fixture file.

use std::env;

use chrono::Utc;
use serde::Serialize;

use delicia_core::schedule::{ClockTime, PickupWindow};
use delicia_core::{Order, Reservation};
use delicia_mock::MockData;

#[derive(Serialize)]
struct Fixture {
    seed: Option<u64>,
    orders: Vec<Order>,
    reservations: Vec<Reservation>,
    slot_bookings: Vec<(ClockTime, u32)>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut orders: usize = 15;
    let mut reservations: usize = 8;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--orders" | "-o" => {
                if i + 1 < args.len() {
                    orders = args[i + 1].parse()?;
                    i += 1;
                }
            }
            "--reservations" | "-r" => {
                if i + 1 < args.len() {
                    reservations = args[i + 1].parse()?;
                    i += 1;
                }
            }
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    seed = Some(args[i + 1].parse()?);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Delícia Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -o, --orders <N>        Orders to generate (default: 15)");
                println!("  -r, --reservations <N>  Reservations to generate (default: 8)");
                println!("  -s, --seed <SEED>       Seed for reproducible output");
                println!("  -h, --help              Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("⚠ Ignoring unknown argument: {}", other);
            }
        }
        i += 1;
    }

    eprintln!("🌱 Delícia Seed Data Generator");
    eprintln!("==============================");
    eprintln!("Orders:       {}", orders);
    eprintln!("Reservations: {}", reservations);
    match seed {
        Some(seed) => eprintln!("Seed:         {}", seed),
        None => eprintln!("Seed:         (random)"),
    }

    let now = Utc::now();
    let mut mock = MockData::new(seed);

    let fixture = Fixture {
        seed,
        orders: mock.orders(orders, now),
        reservations: mock.reservations(reservations, now),
        slot_bookings: mock
            .slot_bookings(&PickupWindow::default())
            .into_iter()
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&fixture)?);

    eprintln!("✓ Seed complete!");
    Ok(())
}
