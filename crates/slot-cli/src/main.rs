//! `slots` CLI — run the slot negotiation pipeline from the command line.
//!
//! Slot lists are JSON arrays of ISO 8601 strings, read from `-i FILE` or
//! stdin. Results are written to stdout as JSON; logs go to stderr.
//!
//! ## Usage
//!
//! ```sh
//! # Flatten a provider free-slots payload
//! slots normalize -i free-slots.json
//!
//! # Morning slots on Friday, London time
//! echo '["2026-01-30T08:00:00Z","2026-01-30T15:00:00Z"]' | slots filter --day friday --time-of-day morning
//!
//! # Apply a tenant's weekly windows
//! slots --config tenant.json windows -i slots.json
//!
//! # Best + contrasting pair, optionally contrasted against a wider pool
//! slots pick -i preferred.json --pool all.json
//!
//! # "Friday 09:00" strings
//! slots --timezone America/New_York format -i pair.json
//!
//! # Whole pipeline
//! slots --config tenant.json offer -i slots.json --day tuesday
//!
//! # Fetch from the provider (or from CALENDAR_STUB_SLOTS when set)
//! slots fetch --calendar-id CAL --access-token TOKEN --days 7 --offer
//!
//! # Hand a slot to the (stub) booker
//! slots book --slot 2026-01-30T09:00:00Z --tenant-id t --contact-id c --conversation-id v
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use slot_engine::{
    build_offer, filter_by_availability, filter_by_signals, format_slots, normalize_free_slots,
    parse_timezone, pick_slot_pair, DaySignal, OfferSignals, StubSlots, TenantConfig, TimeOfDay,
};
use slot_provider::{
    fetch_offer, BookingRequest, LeadConnectorSource, ProviderConfig, SlotBooker, SlotQuery,
    SlotSource, StubBooker,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Filter, pair, and format meeting slots in a tenant's timezone"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Tenant config JSON (timezone + weekly availability)
    #[arg(long, global = true)]
    config: Option<String>,

    /// IANA timezone, overriding the tenant config (default Europe/London)
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Args)]
struct InputArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
}

#[derive(Args)]
struct SignalArgs {
    /// Day signal: monday..sunday, today, tomorrow
    #[arg(long)]
    day: Option<DaySignal>,
    /// Time-of-day signal: morning, afternoon, evening
    #[arg(long)]
    time_of_day: Option<TimeOfDay>,
}

impl SignalArgs {
    fn to_signals(&self) -> OfferSignals {
        OfferSignals {
            day: self.day,
            time_of_day: self.time_of_day,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a provider free-slots payload into a deduplicated list
    Normalize {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Keep slots matching day / time-of-day signals
    Filter {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        signals: SignalArgs,
    },
    /// Keep slots inside the tenant's weekly availability windows
    Windows {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Pick a best + time-of-day-contrasting pair
    Pick {
        #[command(flatten)]
        input: InputArgs,
        /// Slot list to draw the contrasting slot from
        #[arg(long)]
        pool: Option<String>,
    },
    /// Render slots as "Weekday HH:MM" in local time
    Format {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Run windows → filter → pick → format in one go
    Offer {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        signals: SignalArgs,
    },
    /// Fetch free slots from the calendar provider
    Fetch {
        /// Provider calendar id
        #[arg(long, env = "CALENDAR_ID", default_value = "")]
        calendar_id: String,
        /// Provider access token
        #[arg(long, env = "CALENDAR_ACCESS_TOKEN", default_value = "", hide_env_values = true)]
        access_token: String,
        /// Restrict to one team member
        #[arg(long)]
        user_id: Option<String>,
        /// Window start, RFC 3339 (defaults to now)
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        /// Window length in days
        #[arg(long, default_value_t = 7)]
        days: i64,
        /// Provider base URL
        #[arg(long, default_value = slot_provider::leadconnector::DEFAULT_BASE_URL)]
        base_url: String,
        /// JSON array of ISO strings served instead of calling the provider
        #[arg(long, env = "CALENDAR_STUB_SLOTS")]
        stub_slots: Option<String>,
        /// Build an offer from the fetched slots instead of printing them
        #[arg(long)]
        offer: bool,
        #[command(flatten)]
        signals: SignalArgs,
    },
    /// Book a slot with the stub booker
    Book {
        /// Slot string exactly as the provider returned it
        #[arg(long)]
        slot: String,
        #[arg(long)]
        tenant_id: String,
        #[arg(long)]
        contact_id: String,
        #[arg(long)]
        conversation_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let tenant = load_tenant(cli.config.as_deref())?;
    let tz = resolve_timezone(&tenant, cli.timezone.as_deref())?;
    debug!(timezone = tz.name(), "tenant resolved");

    match cli.command {
        Commands::Normalize { input } => {
            let raw = read_input(input.input.as_deref())?;
            let payload: serde_json::Value =
                serde_json::from_str(&raw).context("Provider payload is not valid JSON")?;
            print_json(&normalize_free_slots(&payload))?;
        }
        Commands::Filter { input, signals } => {
            let slots = read_slots(input.input.as_deref())?;
            let filtered = filter_by_signals(&slots, signals.day, signals.time_of_day, tz);
            print_json(&filtered)?;
        }
        Commands::Windows { input } => {
            let slots = read_slots(input.input.as_deref())?;
            let filtered = filter_by_availability(&slots, tenant.availability.as_ref(), tz);
            print_json(&filtered)?;
        }
        Commands::Pick { input, pool } => {
            let slots = read_slots(input.input.as_deref())?;
            let pool = pool.as_deref().map(|p| read_slots(Some(p))).transpose()?;
            let pair = pick_slot_pair(&slots, tz, pool.as_deref());
            print_json(&pair)?;
        }
        Commands::Format { input } => {
            let slots = read_slots(input.input.as_deref())?;
            print_json(&format_slots(&slots, tz))?;
        }
        Commands::Offer { input, signals } => {
            let slots = read_slots(input.input.as_deref())?;
            let offer = build_offer(
                &slots,
                tz,
                tenant.availability.as_ref(),
                &signals.to_signals(),
            );
            if offer.is_empty() {
                eprintln!("No slots available");
            }
            print_json(&offer)?;
        }
        Commands::Fetch {
            calendar_id,
            access_token,
            user_id,
            start,
            days,
            base_url,
            stub_slots,
            offer,
            signals,
        } => {
            let stub = stub_slots.as_deref().and_then(StubSlots::parse);
            if stub.is_none() && (calendar_id.is_empty() || access_token.is_empty()) {
                anyhow::bail!(
                    "fetch needs --calendar-id and --access-token (or CALENDAR_STUB_SLOTS)"
                );
            }

            let config = ProviderConfig::new(access_token, calendar_id).with_base_url(base_url);
            let source = LeadConnectorSource::new(config)
                .context("Failed to build provider client")?
                .with_stub(stub);

            let start = start.unwrap_or_else(Utc::now);
            let mut query = SlotQuery::new(start, start + Duration::days(days)).with_timezone(tz);
            if let Some(user_id) = user_id {
                query = query.with_user(user_id);
            }

            if offer {
                let fetched = fetch_offer(
                    &source,
                    &query,
                    tenant.availability.as_ref(),
                    &signals.to_signals(),
                    Utc::now(),
                )
                .await
                .context("Failed to fetch free slots")?;
                if fetched.offer.is_empty() {
                    eprintln!("No slots available");
                }
                print_json(&fetched)?;
            } else {
                let free = source
                    .free_slots(&query)
                    .await
                    .context("Failed to fetch free slots")?;
                print_json(&free)?;
            }
        }
        Commands::Book {
            slot,
            tenant_id,
            contact_id,
            conversation_id,
        } => {
            let request = BookingRequest {
                tenant_id,
                slot,
                contact_id,
                conversation_id,
                metadata: None,
            };
            let confirmation = StubBooker
                .book(request)
                .await
                .context("Failed to book slot")?;
            print_json(&confirmation)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_tenant(path: Option<&str>) -> Result<TenantConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read tenant config: {}", path))?;
            TenantConfig::from_json_str(&json)
                .with_context(|| format!("Invalid tenant config: {}", path))
        }
        None => Ok(TenantConfig::default()),
    }
}

fn resolve_timezone(tenant: &TenantConfig, flag: Option<&str>) -> Result<Tz> {
    let tz = match flag {
        Some(name) => parse_timezone(name)?,
        None => tenant.tz()?,
    };
    Ok(tz)
}

fn read_slots(path: Option<&str>) -> Result<Vec<String>> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Slots must be a JSON array of strings")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
