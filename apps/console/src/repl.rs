//! # Console Front End
//!
//! Line-oriented front end over the command layer.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    REPL Loop                                            │
//! │                                                                         │
//! │  stdin line ──► tokenize ──► Args ──► dispatch ──► commands::*          │
//! │                    │                                    │               │
//! │                    │  key=value, key="two words"        │ Result<T, _>  │
//! │                    ▼                                    ▼               │
//! │              positional words              {"ok":true,"data":...}       │
//! │                                            {"ok":false,"error":{...}}   │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                                              stdout, one line each      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. `quit` or end of
//! input stops the loop.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use taller_core::validation::{parse_date, parse_money};
use taller_core::{
    AppointmentStatus, Money, NewClient, NewInventoryItem, NewService, TimeSlot, ValidationError,
};
use taller_store::{AppointmentFilter, BookingRequest, ClientRef};

use crate::commands::{appointments, catalog, clients, inventory, reports, session as session_cmd};
use crate::error::{ApiError, ErrorCode};
use crate::state::Session;

/// Usage lines returned by `help`.
pub const USAGE: &[&str] = &[
    "help",
    "quit | exit",
    "home",
    "config",
    "login user=<user> password=<password>",
    "logout",
    "profile [name=] [phone=] [opens_at=] [closes_at=]            (admin)",
    "register name= phone= [email=] make= model= year= plate=",
    "clients",
    "vehicles",
    "search q=<text>",
    "services",
    "add-service name= price= duration=                           (admin)",
    "book service= date=YYYY-MM-DD time=HH:MM client=<id> [vehicle=<id>]",
    "book service= date= time= name= phone= [email=] make= model= year= plate=",
    "appointments [date=YYYY-MM-DD] [status=<status>|All]",
    "cancel id=<appointment id>",
    "complete id=<appointment id>",
    "today",
    "upcoming                                                     (admin)",
    "calendar [from=YYYY-MM-DD] [to=YYYY-MM-DD]                   (admin)",
    "inventory",
    "low-stock",
    "add-item name= stock= min= price= supplier=",
    "stock id=<item id> value=<n> | stock name=<item name> value=<n>",
    "report summary|status|revenue-service|revenue-month|services|clients  (admin)",
    "dashboard                                                    (admin)",
    "reset",
];

/// Status filter values that select every status.
const ALL_STATUSES: [&str; 3] = ["all", "todas", "todos"];

/// What the loop should do after a line.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Reply(Value),
    Quit,
}

// =============================================================================
// Tokenizer
// =============================================================================

/// Splits a line on whitespace. Double quotes group words and are removed.
pub fn tokenize(line: &str) -> Result<Vec<String>, ValidationError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(ValidationError::InvalidFormat {
            field: "line".to_string(),
            reason: "unterminated quote".to_string(),
        });
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

// =============================================================================
// Arguments
// =============================================================================

/// Parsed arguments of one command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    named: HashMap<String, String>,
    positional: Vec<String>,
}

impl Args {
    pub fn parse<I: IntoIterator<Item = String>>(tokens: I) -> Self {
        let mut args = Args::default();
        for token in tokens {
            match token.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    args.named.insert(key.to_lowercase(), value.to_string());
                }
                _ => args.positional.push(token),
            }
        }
        args
    }

    pub fn optional(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    pub fn required(&self, key: &str) -> Result<&str, ValidationError> {
        self.optional(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ValidationError::Required {
                field: key.to_string(),
            })
    }

    /// Text field; missing means empty so form validation reports it.
    pub fn text(&self, key: &str) -> String {
        self.optional(key).unwrap_or_default().to_string()
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    pub fn int(&self, key: &str) -> Result<i64, ValidationError> {
        let raw = self.required(key)?;
        raw.trim().parse().map_err(|_| ValidationError::InvalidFormat {
            field: key.to_string(),
            reason: format!("'{}' is not a whole number", raw),
        })
    }

    pub fn date(&self, key: &str) -> Result<NaiveDate, ValidationError> {
        parse_date(key, self.required(key)?)
    }

    pub fn optional_date(&self, key: &str) -> Result<Option<NaiveDate>, ValidationError> {
        self.optional(key).map(|v| parse_date(key, v)).transpose()
    }

    pub fn money(&self, key: &str) -> Result<Money, ValidationError> {
        parse_money(key, self.required(key)?)
    }

    pub fn time_slot(&self, key: &str) -> Result<TimeSlot, ValidationError> {
        self.required(key)?.parse()
    }

    /// Status filter; absent or `All`/`Todas`/`Todos` means no filter.
    pub fn optional_status(&self, key: &str) -> Result<Option<AppointmentStatus>, ValidationError> {
        match self.optional(key).map(str::trim) {
            None => Ok(None),
            Some(v) if ALL_STATUSES.iter().any(|all| v.eq_ignore_ascii_case(all)) => Ok(None),
            Some(v) => v.parse().map(Some),
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Wraps a command result in the response envelope.
pub fn respond<T: Serialize>(result: Result<T, ApiError>) -> Value {
    match result.and_then(|data| {
        serde_json::to_value(data).map_err(|e| ApiError::internal(e.to_string()))
    }) {
        Ok(data) => json!({ "ok": true, "data": data }),
        Err(error) => json!({ "ok": false, "error": error }),
    }
}

/// Runs one line against the session.
pub fn execute(session: &mut Session, line: &str) -> Outcome {
    let tokens = match tokenize(line) {
        Ok(tokens) => tokens,
        Err(e) => return Outcome::Reply(respond::<()>(Err(e.into()))),
    };
    let mut tokens = tokens.into_iter();
    let Some(command) = tokens.next() else {
        return Outcome::Reply(respond::<()>(Err(ApiError::new(
            ErrorCode::UnknownCommand,
            "Empty command",
        ))));
    };
    let command = command.to_lowercase();
    let args = Args::parse(tokens);
    debug!(command = %command, "Console command");

    let reply = match command.as_str() {
        "quit" | "exit" => return Outcome::Quit,
        "help" => respond(Ok(USAGE)),

        // ----- Session -----
        "login" => respond(
            args.required("user")
                .and_then(|user| Ok((user, args.required("password")?)))
                .map_err(ApiError::from)
                .and_then(|(user, password)| session_cmd::login(session, user, password)),
        ),
        "logout" => respond(session_cmd::logout(session)),
        "config" => respond(session_cmd::get_config(session)),
        "home" => respond(session_cmd::home(session)),
        "profile" => respond(session_cmd::update_profile(
            session,
            session_cmd::ProfileUpdate {
                name: args.optional("name").map(str::to_string),
                phone: args.optional("phone").map(str::to_string),
                opens_at: args.optional("opens_at").map(str::to_string),
                closes_at: args.optional("closes_at").map(str::to_string),
            },
        )),
        "reset" => respond(session_cmd::reset(session)),

        // ----- Clients -----
        "register" => respond(
            new_client_form(&args)
                .map_err(ApiError::from)
                .and_then(|form| clients::register_client(session, form)),
        ),
        "clients" => respond(clients::list_clients(session)),
        "vehicles" => respond(clients::list_vehicles(session)),
        "search" => {
            let query = args
                .optional("q")
                .or_else(|| args.positional(0))
                .unwrap_or_default();
            respond(clients::search_clients(session, query))
        }

        // ----- Catalog -----
        "services" => respond(catalog::list_services(session)),
        "add-service" => respond(
            new_service_form(&args)
                .map_err(ApiError::from)
                .and_then(|form| catalog::add_service(session, form)),
        ),

        // ----- Appointments -----
        "book" => respond(
            booking_request(&args)
                .map_err(ApiError::from)
                .and_then(|request| appointments::book_appointment(session, request)),
        ),
        "appointments" => respond(
            appointment_filter(&args)
                .map_err(ApiError::from)
                .and_then(|filter| appointments::list_appointments(session, filter)),
        ),
        "cancel" => respond(
            args.required("id")
                .map_err(ApiError::from)
                .and_then(|id| appointments::cancel_appointment(session, id)),
        ),
        "complete" => respond(
            args.required("id")
                .map_err(ApiError::from)
                .and_then(|id| appointments::complete_appointment(session, id)),
        ),
        "today" => respond(appointments::today_count(session)),
        "upcoming" => respond(appointments::upcoming(session)),
        "calendar" => respond(
            args.optional_date("from")
                .and_then(|from| Ok((from, args.optional_date("to")?)))
                .map_err(ApiError::from)
                .and_then(|(from, to)| appointments::calendar(session, from, to)),
        ),

        // ----- Inventory -----
        "inventory" => respond(inventory::list_inventory(session)),
        "low-stock" => respond(inventory::low_stock_alerts(session)),
        "add-item" => respond(
            new_item_form(&args)
                .map_err(ApiError::from)
                .and_then(|form| inventory::add_item(session, form)),
        ),
        "stock" => respond(
            stock_edit(&args)
                .map_err(ApiError::from)
                .and_then(|(key, value)| inventory::update_stock(session, key, value)),
        ),

        // ----- Reports -----
        "report" => {
            let kind = args
                .optional("kind")
                .or_else(|| args.positional(0))
                .unwrap_or("summary");
            respond(
                kind.parse::<reports::ReportKind>()
                    .map_err(ApiError::from)
                    .and_then(|kind| reports::report(session, kind)),
            )
        }
        "dashboard" => respond(reports::dashboard(session)),

        other => {
            warn!(command = %other, "Unknown console command");
            respond::<()>(Err(ApiError::new(
                ErrorCode::UnknownCommand,
                format!("Unknown command '{}'. Type 'help' for the list.", other),
            )))
        }
    };

    Outcome::Reply(reply)
}

fn new_client_form(args: &Args) -> Result<NewClient, ValidationError> {
    let year = args.int("year")?;
    let year = i32::try_from(year).map_err(|_| ValidationError::InvalidFormat {
        field: "year".to_string(),
        reason: format!("{} is not a valid year", year),
    })?;

    Ok(NewClient {
        name: args.text("name"),
        phone: args.text("phone"),
        email: args.text("email"),
        make: args.text("make"),
        model: args.text("model"),
        year,
        plate: args.text("plate"),
    })
}

fn new_service_form(args: &Args) -> Result<NewService, ValidationError> {
    Ok(NewService {
        name: args.text("name"),
        price: args.money("price")?,
        duration: args.text("duration"),
    })
}

fn new_item_form(args: &Args) -> Result<NewInventoryItem, ValidationError> {
    Ok(NewInventoryItem {
        name: args.text("name"),
        stock: args.int("stock")?,
        stock_min: args.int("min")?,
        unit_price: args.money("price")?,
        supplier: args.text("supplier"),
    })
}

fn booking_request(args: &Args) -> Result<BookingRequest, ValidationError> {
    let client = match args.optional("client") {
        Some(client_id) => ClientRef::Existing {
            client_id: client_id.to_string(),
            vehicle_id: args.optional("vehicle").map(str::to_string),
        },
        None => ClientRef::New(new_client_form(args)?),
    };

    Ok(BookingRequest {
        client,
        service: args.required("service")?.to_string(),
        date: args.date("date")?,
        time: args.time_slot("time")?,
    })
}

fn appointment_filter(args: &Args) -> Result<AppointmentFilter, ValidationError> {
    Ok(AppointmentFilter {
        date: args.optional_date("date")?,
        status: args.optional_status("status")?,
    })
}

fn stock_edit(args: &Args) -> Result<(inventory::ItemKey, i64), ValidationError> {
    let key = match (args.optional("id"), args.optional("name")) {
        (Some(id), _) => inventory::ItemKey::Id(id.to_string()),
        (None, Some(name)) => inventory::ItemKey::Name(name.to_string()),
        (None, None) => {
            return Err(ValidationError::Required {
                field: "id".to_string(),
            })
        }
    };
    Ok((key, args.int("value")?))
}

// =============================================================================
// Loop
// =============================================================================

/// Reads commands until `quit` or end of input, one JSON reply per line.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut output: W) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match execute(session, line) {
            Outcome::Quit => break,
            Outcome::Reply(reply) => {
                writeln!(output, "{}", reply)?;
                output.flush()?;
            }
        }
    }
    Ok(())
}
