use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use mesonet::cache::{CacheConfig, CachedMesonetClient};
use mesonet::fetch::{MesonetClient, MesonetConfig};
use mesonet::remote_table;
use mesonet::stations::station_info;

/// Fields shown by default, in display order.
const FIELDS: [&str; 6] = ["stid", "time", "relh", "tair", "wspd", "pres"];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Station and date from environment
    let site = std::env::var("MESONET_SITE").unwrap_or_else(|_| "nrmn".to_string());
    let timestamp = match std::env::var("MESONET_DATE") {
        Ok(date) => match NaiveDate::parse_from_str(&date, "%Y%m%d") {
            Ok(d) => d.and_hms_opt(0, 0, 0),
            Err(e) => {
                eprintln!("Invalid MESONET_DATE {date:?} (expected YYYYMMDD): {e}");
                std::process::exit(2);
            }
        },
        Err(_) => None,
    };
    let json = std::env::var("MESONET_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let mut config = MesonetConfig::new();
    if let Ok(url) = std::env::var("MESONET_BASE_URL") {
        config = config.with_base_url(url);
    }

    let client = match MesonetClient::new(config) {
        Ok(client) => CachedMesonetClient::new(client, &CacheConfig::default()),
        Err(e) => {
            eprintln!("Failed to create Mesonet client: {e}");
            std::process::exit(1);
        }
    };

    let table = match remote_table(&client, timestamp, Some(&FIELDS[..]), Some(site.as_str()), true) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Failed to load data for {site}: {e}");
            std::process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&table) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Failed to serialize table: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let location = match station_info() {
        Ok(info) => mesonet::domain::StationId::parse(&site)
            .ok()
            .and_then(|id| info.get(&id).cloned()),
        Err(e) => {
            eprintln!("Warning: failed to load station table: {e}");
            None
        }
    };
    match location {
        Some(loc) => println!("{} ({:.4}, {:.4})", loc.stid, loc.lat, loc.lon),
        None => println!("{}", site.to_uppercase()),
    }
    println!();
    print!("{table}");
}
