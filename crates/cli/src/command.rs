//! Command-log lines.
//!
//! One whitespace-separated command per line:
//!
//! ```text
//! register <customer|supplier> <id> <name> <city> <address>
//! add|update <product_id> <name> <price> <supplier_id> <quantity>
//! remove <customer|supplier|product|order> <id>
//! order <customer_id> <product_id> [<quantity>]
//! search <query> [<max_price>]
//! ```
//!
//! Underscores in text fields stand in for spaces.

use core::str::FromStr;

use rust_decimal::Decimal;

use matamazon_catalog::RecordKind;
use matamazon_parties::PartyKind;

/// A parsed log command. Numeric fields stay raw; the store validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register {
        kind: PartyKind,
        id: i64,
        name: String,
        city: String,
        address: String,
    },
    Upsert {
        id: i64,
        name: String,
        price: Decimal,
        supplier_id: i64,
        quantity: i64,
    },
    Remove {
        kind: RecordKind,
        id: i64,
    },
    Order {
        customer_id: i64,
        product_id: i64,
        quantity: i64,
    },
    Search {
        query: String,
        max_price: Option<Decimal>,
    },
}

/// Why a log line could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    Unknown(String),
    Malformed(String),
}

impl Command {
    /// Parse one log line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseFailure> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match name {
            "register" => {
                let [kind, id, party_name, city, address] = exact::<5>(name, args)?;
                Command::Register {
                    kind: PartyKind::from_str(kind).map_err(|e| malformed(name, e))?,
                    id: number(name, "id", id)?,
                    name: spaced(party_name),
                    city: spaced(city),
                    address: spaced(address),
                }
            }
            "add" | "update" => {
                let [id, product_name, price, supplier_id, quantity] = exact::<5>(name, args)?;
                Command::Upsert {
                    id: number(name, "product id", id)?,
                    name: spaced(product_name),
                    price: number(name, "price", price)?,
                    supplier_id: number(name, "supplier id", supplier_id)?,
                    quantity: number(name, "quantity", quantity)?,
                }
            }
            "remove" => {
                let [kind, id] = exact::<2>(name, args)?;
                Command::Remove {
                    kind: RecordKind::from_str(kind).map_err(|e| malformed(name, e))?,
                    id: number(name, "id", id)?,
                }
            }
            "order" => match args {
                [customer_id, product_id] | [customer_id, product_id, _] => Command::Order {
                    customer_id: number(name, "customer id", customer_id)?,
                    product_id: number(name, "product id", product_id)?,
                    quantity: match args.get(2) {
                        Some(q) => number(name, "quantity", q)?,
                        None => 1,
                    },
                },
                _ => return Err(arity(name, "2 or 3", args.len())),
            },
            "search" => match args {
                [query] => Command::Search {
                    query: spaced(query),
                    max_price: None,
                },
                [query, max_price] => Command::Search {
                    query: spaced(query),
                    max_price: Some(number(name, "max price", max_price)?),
                },
                _ => return Err(arity(name, "1 or 2", args.len())),
            },
            other => return Err(ParseFailure::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }

    /// The command word, for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Register { .. } => "register",
            Command::Upsert { .. } => "add",
            Command::Remove { .. } => "remove",
            Command::Order { .. } => "order",
            Command::Search { .. } => "search",
        }
    }
}

fn exact<'a, const N: usize>(name: &str, args: &[&'a str]) -> Result<[&'a str; N], ParseFailure> {
    <[&str; N]>::try_from(args).map_err(|_| arity(name, &N.to_string(), args.len()))
}

fn number<T: FromStr>(command: &str, field: &str, raw: &str) -> Result<T, ParseFailure>
where
    T::Err: core::fmt::Display,
{
    raw.parse()
        .map_err(|e| ParseFailure::Malformed(format!("{command}: {field} {raw:?}: {e}")))
}

fn spaced(raw: &str) -> String {
    raw.replace('_', " ")
}

fn malformed(command: &str, err: impl core::fmt::Display) -> ParseFailure {
    ParseFailure::Malformed(format!("{command}: {err}"))
}

fn arity(command: &str, expected: &str, found: usize) -> ParseFailure {
    ParseFailure::Malformed(format!(
        "{command} takes {expected} arguments, found {found}"
    ))
}
