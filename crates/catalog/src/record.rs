//! Canonical record lines.
//!
//! Catalog snapshots hold one record per line in constructor-call form:
//!
//! ```text
//! Customer(id=42, name='Daniel Elgarici', city='Karmiel', address='123 Main Street')
//! Supplier(id=7, name='Yinon Goldshtein', city='Haifa', address='32 David Rose Street')
//! Product(id=101, name='Harry Potter Cushion', price=29.99, supplier_id=7, quantity=555)
//! ```
//!
//! Keyword arguments may come in any order. A line that does not match one of
//! the record shapes is not a record; a line that matches but carries invalid
//! values is a domain error.

use core::str::FromStr;
use std::collections::HashMap;

use rust_decimal::Decimal;

use matamazon_core::{DomainError, DomainResult, Price};
use matamazon_parties::{Party, PartyKind};
use matamazon_products::Product;

/// The four record collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Customer,
    Supplier,
    Product,
    Order,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Customer => "customer",
            RecordKind::Supplier => "supplier",
            RecordKind::Product => "product",
            RecordKind::Order => "order",
        }
    }
}

impl From<PartyKind> for RecordKind {
    fn from(kind: PartyKind) -> Self {
        match kind {
            PartyKind::Customer => RecordKind::Customer,
            PartyKind::Supplier => RecordKind::Supplier,
        }
    }
}

impl core::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(RecordKind::Customer),
            "supplier" => Ok(RecordKind::Supplier),
            "product" => Ok(RecordKind::Product),
            "order" => Ok(RecordKind::Order),
            other => Err(DomainError::validation(format!(
                "record kind must be customer, supplier, product or order, got {other:?}"
            ))),
        }
    }
}

/// A record recovered from a catalog snapshot line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRecord {
    Party(Party),
    Product(Product),
}

/// Parse one snapshot line.
///
/// Returns `Ok(None)` for lines that are not catalog records (including
/// `Order(...)` lines, which snapshots never carry).
pub fn parse_record(line: &str) -> DomainResult<Option<CatalogRecord>> {
    let Some((name, body)) = split_call(line) else {
        return Ok(None);
    };
    let Some(args) = parse_kwargs(body) else {
        return Ok(None);
    };

    match name {
        "Customer" => parse_party(PartyKind::Customer, &args),
        "Supplier" => parse_party(PartyKind::Supplier, &args),
        "Product" => parse_product(&args),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value<'a> {
    Quoted(&'a str),
    Bare(&'a str),
}

type Kwargs<'a> = HashMap<&'a str, Value<'a>>;

fn parse_party(kind: PartyKind, args: &Kwargs<'_>) -> DomainResult<Option<CatalogRecord>> {
    if !has_exactly(args, &["id", "name", "city", "address"]) {
        return Ok(None);
    }
    let (Some(id), Some(name), Some(city), Some(address)) = (
        int(args, "id"),
        text(args, "name"),
        text(args, "city"),
        text(args, "address"),
    ) else {
        return Ok(None);
    };

    Party::new(kind, id, name, city, address).map(|p| Some(CatalogRecord::Party(p)))
}

fn parse_product(args: &Kwargs<'_>) -> DomainResult<Option<CatalogRecord>> {
    if !has_exactly(args, &["id", "name", "price", "supplier_id", "quantity"]) {
        return Ok(None);
    }
    let (Some(id), Some(name), Some(price), Some(supplier_id), Some(quantity)) = (
        int(args, "id"),
        text(args, "name"),
        decimal(args, "price"),
        int(args, "supplier_id"),
        int(args, "quantity"),
    ) else {
        return Ok(None);
    };

    let price = Price::new(price)?;
    Product::new(id, name, price, supplier_id, quantity).map(|p| Some(CatalogRecord::Product(p)))
}

fn has_exactly(args: &Kwargs<'_>, keys: &[&str]) -> bool {
    args.len() == keys.len() && keys.iter().all(|k| args.contains_key(*k))
}

fn int(args: &Kwargs<'_>, key: &str) -> Option<i64> {
    match args.get(key)? {
        Value::Bare(raw) => raw.parse().ok(),
        Value::Quoted(_) => None,
    }
}

fn decimal(args: &Kwargs<'_>, key: &str) -> Option<Decimal> {
    match args.get(key)? {
        Value::Bare(raw) => Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .ok(),
        Value::Quoted(_) => None,
    }
}

fn text<'a>(args: &Kwargs<'a>, key: &str) -> Option<&'a str> {
    match args.get(key)? {
        Value::Quoted(s) => Some(*s),
        Value::Bare(_) => None,
    }
}

/// Split `Name(body)` into its parts.
fn split_call(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    let open = line.find('(')?;
    let name = line[..open].trim();
    if !is_identifier(name) {
        return None;
    }
    let body = line[open + 1..].strip_suffix(')')?;
    Some((name, body))
}

/// Parse `key=value, key='text', ...`.
///
/// A quoted value ends at the first matching quote that is followed by the
/// end of the body or by `, <key>=`, so names may contain the quote character.
fn parse_kwargs(body: &str) -> Option<Kwargs<'_>> {
    let mut args = HashMap::new();
    let mut rest = body.trim_start();

    while !rest.is_empty() {
        let eq = rest.find('=')?;
        let key = rest[..eq].trim();
        if !is_identifier(key) {
            return None;
        }
        let after_eq = rest[eq + 1..].trim_start();

        let (value, tail) = match after_eq.chars().next() {
            Some(q @ ('\'' | '"')) => {
                let inner = &after_eq[1..];
                let close = closing_quote(inner, q)?;
                (Value::Quoted(&inner[..close]), &inner[close + 1..])
            }
            Some(_) => {
                let end = after_eq.find(',').unwrap_or(after_eq.len());
                let raw = after_eq[..end].trim();
                if raw.is_empty() {
                    return None;
                }
                (Value::Bare(raw), &after_eq[end..])
            }
            None => return None,
        };

        if args.insert(key, value).is_some() {
            return None;
        }

        let tail = tail.trim_start();
        rest = match tail.strip_prefix(',') {
            Some(next) => next.trim_start(),
            None if tail.is_empty() => tail,
            None => return None,
        };
    }

    Some(args)
}

fn closing_quote(inner: &str, quote: char) -> Option<usize> {
    inner.match_indices(quote).map(|(i, _)| i).find(|&i| {
        let after = inner[i + 1..].trim_start();
        after.is_empty() || after.strip_prefix(',').is_some_and(starts_with_key)
    })
}

fn starts_with_key(s: &str) -> bool {
    s.find('=').is_some_and(|eq| is_identifier(s[..eq].trim()))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use matamazon_core::Entity;

    fn record(line: &str) -> CatalogRecord {
        parse_record(line).unwrap().expect("line should be a record")
    }

    #[test]
    fn parses_canonical_customer_line() {
        let line = "Customer(id=42, name='Daniel Elgarici', city='Karmiel', address='123 Main Street')";
        match record(line) {
            CatalogRecord::Party(p) => {
                assert_eq!(p.kind(), PartyKind::Customer);
                assert_eq!(p.id().get(), 42);
                assert_eq!(p.address(), "123 Main Street");
                assert_eq!(p.to_string(), line);
            }
            other => panic!("Expected party, got {other:?}"),
        }
    }

    #[test]
    fn parses_product_with_keywords_out_of_order() {
        let line = "Product(quantity=5, supplier_id=1, price=20.50, name='Mug', id=10)";
        match record(line) {
            CatalogRecord::Product(p) => {
                assert_eq!(p.id().get(), 10);
                assert_eq!(p.quantity(), 5);
                assert_eq!(p.price().to_string(), "20.5");
                assert_eq!(p.supplier_id().get(), 1);
            }
            other => panic!("Expected product, got {other:?}"),
        }
    }

    #[test]
    fn names_may_contain_quotes_and_commas() {
        let line = "Supplier(id=3, name='O'Reilly, Ltd', city='Tel Aviv', address='1 Rothschild')";
        match record(line) {
            CatalogRecord::Party(p) => {
                assert_eq!(p.name(), "O'Reilly, Ltd");
                assert_eq!(p.city(), "Tel Aviv");
            }
            other => panic!("Expected party, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_lines_are_not_records() {
        for line in [
            "",
            "hello world",
            "Order(id=1, customer_id=7, product_id=10, quantity=3, total_price=60)",
            "Customer(id=1, name='a', city='b')",
            "Customer(id=1, name='a', city='b', address='c', extra=1)",
            "Customer(id=one, name='a', city='b', address='c')",
            "Customer(id='1', name='a', city='b', address='c')",
            "Customer(id=1, name=a, city='b', address='c')",
            "Customer(id=1, id=2, name='a', city='b')",
            "Product(id=1, name='x', price=cheap, supplier_id=1, quantity=1)",
            "Customer(id=1, name='a', city='b', address='c'",
            "__import__('os')",
        ] {
            assert_eq!(parse_record(line).unwrap(), None, "line: {line:?}");
        }
    }

    #[test]
    fn well_formed_lines_with_invalid_values_are_errors() {
        let err = parse_record("Customer(id=-1, name='a', city='b', address='c')").unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));

        let err = parse_record("Product(id=1, name='x', price=-2.5, supplier_id=1, quantity=1)")
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidPrice(_)));

        let err = parse_record("Product(id=1, name='x', price=2, supplier_id=1, quantity=-1)")
            .unwrap_err();
        assert!(err.is_invalid_id());
    }

    #[test]
    fn record_kind_parses_case_insensitively() {
        assert_eq!("Order".parse::<RecordKind>().unwrap(), RecordKind::Order);
        assert_eq!(" product ".parse::<RecordKind>().unwrap(), RecordKind::Product);
        assert!("invoice".parse::<RecordKind>().is_err());
        assert_eq!(RecordKind::from(PartyKind::Supplier), RecordKind::Supplier);
    }
}
