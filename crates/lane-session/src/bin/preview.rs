//! # Display Preview
//!
//! Builds a demo basket and prints the classified display sequence.
//!
//! ## Usage
//! ```bash
//! # Mixed basket: sales, salespeople, every return flavor
//! cargo run -p lane-session --bin preview
//!
//! # Same basket viewed in return mode (plain lines hidden)
//! cargo run -p lane-session --bin preview -- --return-mode
//!
//! # Raw renderer payload (the tagged DisplayEntry union as JSON)
//! cargo run -p lane-session --bin preview -- --json
//!
//! # With debug logging
//! RUST_LOG=debug cargo run -p lane-session --bin preview
//! ```

use std::env;

use chrono::Utc;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use lane_core::types::{
    AccountStatus, DisplayEntry, Employee, GroupKey, ItemDisplayLine, LineType,
    OriginatingTransaction, SeparatorKind,
};
use lane_session::{DisplayConfig, DisplaySession, SessionResult};

fn employee(number: &str, first: &str, last: &str) -> Employee {
    Employee {
        employee_number: number.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        account_status: AccountStatus::Active,
    }
}

fn line(line_number: u32, sku: &str, description: &str, cents: i64) -> ItemDisplayLine {
    ItemDisplayLine {
        id: Uuid::new_v4().to_string(),
        line_number,
        line_type: LineType::ItemSale,
        salesperson: None,
        transaction_id_from_return_transaction: None,
        line_number_from_return_transaction: None,
        subline_index_from_return_item: None,
        offline_return_reference_number: None,
        selectable: true,
        sku_snapshot: sku.to_string(),
        description_snapshot: description.to_string(),
        quantity: 1,
        unit_price_cents: cents,
        extended_amount_cents: cents,
        added_at: Utc::now(),
    }
}

/// Builds the demo basket: plain sales across two salespeople plus one line
/// of every return flavor.
fn build_demo_session(return_mode: bool) -> SessionResult<DisplaySession> {
    let config = match DisplayConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Config load failed, using defaults");
            DisplayConfig::default()
        }
    };
    let mut session = DisplaySession::new(config);

    let ada = employee("100524", "Ada", "Lovelace");
    let grace = employee("200731", "Grace", "Hopper");

    let mut l1 = line(1, "COKE-330", "Coca-Cola 330ml", 199);
    l1.salesperson = Some(ada.clone());
    let mut l2 = line(2, "SNK-0042", "Lays Classic", 249);
    l2.salesperson = Some(grace);
    let mut l3 = line(3, "BEV-0007", "Orange Juice 1L", 349);
    l3.salesperson = Some(ada);
    session.add_line(l1)?;
    session.add_line(l2)?;
    session.add_line(l3)?;
    session.add_line(line(4, "GRO-0019", "Pasta 500g", 129))?;

    // Return cross-referenced to a prior receipt
    session.register_originating_transaction(OriginatingTransaction {
        transaction_id: "9c1d2a34-55e6-47f8-9a0b-1c2d3e4f5a6b".to_string(),
        reference_number: "R-2024-00183".to_string(),
        order_reference_id: None,
    });
    let mut r1 = line(5, "FRZ-0003", "Ice Cream Vanilla", -549);
    r1.line_type = LineType::ItemReturn;
    r1.transaction_id_from_return_transaction =
        Some("9c1d2a34-55e6-47f8-9a0b-1c2d3e4f5a6b".to_string());
    r1.line_number_from_return_transaction = Some(2);
    r1.subline_index_from_return_item = Some(0);
    session.add_line(r1)?;

    // Offline return with an operator-entered reference
    let mut r2 = line(6, "DAI-0011", "Cheddar 200g", -429);
    r2.line_type = LineType::ItemReturn;
    r2.offline_return_reference_number = Some("OFF123".to_string());
    session.add_line(r2)?;

    // No-receipt return
    let mut r3 = line(7, "SNK-0104", "Trail Mix", -319);
    r3.line_type = LineType::ItemReturn;
    session.add_line(r3)?;

    session.set_return_mode(return_mode);
    Ok(session)
}

fn print_sequence(session: &DisplaySession, currency_symbol: &str) {
    let display = session.display();

    println!("DISPLAY SEQUENCE ({} entries)", display.entries.len());
    println!("{}", "─".repeat(64));
    for entry in &display.entries {
        match entry {
            DisplayEntry::Line(l) => {
                let amount = l.extended_amount();
                let sign = if amount.is_negative() { "-" } else { " " };
                println!(
                    "    {:>3}  {:<10} {:<28} {}{}{}.{:02}",
                    l.line_number,
                    l.sku_snapshot,
                    l.description_snapshot,
                    sign,
                    currency_symbol,
                    amount.dollars().abs(),
                    amount.cents_part(),
                );
            }
            DisplayEntry::Salesperson(emp) => {
                println!("  Salesperson: {}", emp.display_name());
            }
            DisplayEntry::Separator(SeparatorKind::ItemLines) => {
                println!("{}", "═".repeat(64));
            }
            DisplayEntry::Separator(SeparatorKind::ReturnTransaction) => {
                println!("{}", "─".repeat(64));
            }
            DisplayEntry::GroupReference(key) => {
                let label = match key {
                    GroupKey::NoReceipt => "Return without receipt",
                    _ => key.display_label(),
                };
                println!("  [{}]", label);
            }
        }
    }
    println!("{}", "─".repeat(64));

    let totals = session.totals();
    println!(
        "  {} lines, qty {}, total {}",
        totals.line_count, totals.total_quantity, totals.extended_amount
    );

    for warning in &display.warnings {
        println!("  warning: {}", warning);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let return_mode = env::args().any(|arg| arg == "--return-mode");
    let as_json = env::args().any(|arg| arg == "--json");

    match build_demo_session(return_mode) {
        Ok(session) => {
            if as_json {
                match serde_json::to_string_pretty(&session.display()) {
                    Ok(payload) => println!("{}", payload),
                    Err(e) => {
                        eprintln!("preview failed: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }
            if return_mode {
                println!("(return mode: plain sale lines hidden)\n");
            }
            let symbol = session.config().currency_symbol.clone();
            print_sequence(&session, &symbol);
        }
        Err(e) => {
            eprintln!("preview failed: {}", e);
            std::process::exit(1);
        }
    }
}
