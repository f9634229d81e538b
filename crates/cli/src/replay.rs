//! Replays a command log against the catalog store.
//!
//! Processing is all-or-nothing per run: the first failing line aborts the
//! replay. Order outcomes and search results are written to the output sink.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, info, info_span};

use matamazon_catalog::MatamazonSystem;
use matamazon_core::{CustomerRef, DomainError, Price, ProductId};
use matamazon_parties::Party;
use matamazon_products::Product;
use matamazon_sales::PlaceOrderOutcome;

use crate::command::{Command, ParseFailure};

#[derive(Debug, Error)]
pub enum ReplayError {
    /// The line names a command the log format does not define.
    #[error("line {line}: unknown command {command:?}")]
    UnknownCommand { line: usize, command: String },

    /// The line has the wrong shape for its command.
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// The store refused the command.
    #[error("line {line}: {source}")]
    Domain {
        line: usize,
        #[source]
        source: DomainError,
    },

    #[error("log io failed: {0}")]
    Io(#[from] io::Error),
}

impl ReplayError {
    /// 1-based log line the failure happened on, if it came from a line.
    pub fn line(&self) -> Option<usize> {
        match self {
            ReplayError::UnknownCommand { line, .. }
            | ReplayError::Malformed { line, .. }
            | ReplayError::Domain { line, .. } => Some(*line),
            ReplayError::Io(_) => None,
        }
    }
}

/// Replay every line of `log` against `store`. Returns the number of commands run.
pub fn replay<R: BufRead, W: Write>(
    store: &mut MatamazonSystem,
    log: R,
    out: &mut W,
) -> Result<usize, ReplayError> {
    let mut executed = 0;

    for (index, line) in log.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(ParseFailure::Unknown(command)) => {
                return Err(ReplayError::UnknownCommand { line: line_no, command });
            }
            Err(ParseFailure::Malformed(reason)) => {
                return Err(ReplayError::Malformed { line: line_no, reason });
            }
        };

        let span = info_span!("command", line = line_no, name = command.name());
        let _guard = span.enter();

        execute(store, command, out).map_err(|err| match err {
            ExecError::Domain(source) => ReplayError::Domain { line: line_no, source },
            ExecError::Io(e) => ReplayError::Io(e),
        })?;
        executed += 1;
    }

    debug!(executed, "log replayed");
    Ok(executed)
}

enum ExecError {
    Domain(DomainError),
    Io(io::Error),
}

impl From<DomainError> for ExecError {
    fn from(e: DomainError) -> Self {
        ExecError::Domain(e)
    }
}

impl From<io::Error> for ExecError {
    fn from(e: io::Error) -> Self {
        ExecError::Io(e)
    }
}

fn execute<W: Write>(
    store: &mut MatamazonSystem,
    command: Command,
    out: &mut W,
) -> Result<(), ExecError> {
    match command {
        Command::Register { kind, id, name, city, address } => {
            store.register(Party::new(kind, id, name, city, address)?)?;
        }
        Command::Upsert { id, name, price, supplier_id, quantity } => {
            let product = Product::new(id, name, Price::new(price)?, supplier_id, quantity)?;
            store.upsert_product(product)?;
        }
        Command::Remove { kind, id } => {
            if let Some(quantity) = store.remove(kind, id)? {
                debug!(id, quantity, "order cancelled; stock restored");
            }
        }
        Command::Order { customer_id, product_id, quantity } => {
            let quantity = u64::try_from(quantity).map_err(|_| {
                DomainError::validation(format!("order quantity {quantity} must be positive"))
            })?;
            let customer_id = CustomerRef::new(customer_id);
            let outcome = match ProductId::new(product_id) {
                Ok(product_id) => store.place_order(customer_id, product_id, quantity)?,
                Err(_) => {
                    info!(product_id, "order refused: unknown product");
                    PlaceOrderOutcome::ProductNotFound
                }
            };
            writeln!(out, "{outcome}")?;
        }
        Command::Search { query, max_price } => {
            let max_price = max_price.map(Price::new).transpose()?;
            for product in store.search(&query, max_price) {
                writeln!(out, "{product}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matamazon_core::{OrderId, PartyId};

    fn run(log: &str) -> (MatamazonSystem, Result<usize, ReplayError>, String) {
        let mut store = MatamazonSystem::new();
        let mut out = Vec::new();
        let result = replay(&mut store, log.as_bytes(), &mut out);
        (store, result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn scenario_log_places_order() {
        let (store, result, out) = run("\
register supplier 1 Yinon_Goldshtein Haifa 32_David_Rose_Street
add 10 Cushion 20 1 5
order 7 10 3
order 7 99
");
        assert_eq!(result.unwrap(), 4);
        assert_eq!(
            out,
            "The order has been accepted in the system\n\
             The product does not exist in the system\n"
        );
        assert_eq!(store.product(ProductId::from_u64(10)).unwrap().quantity(), 2);
        assert_eq!(store.next_order_id(), OrderId::from_u64(2));
        assert_eq!(
            store.supplier(PartyId::from_u64(1)).unwrap().address(),
            "32 David Rose Street"
        );
    }

    #[test]
    fn negative_order_ids_do_not_abort() {
        let (store, result, out) = run("\
register supplier 1 S Haifa Port
add 10 Cushion 20 1 5
order -5 10 1
order 7 -1
order 7 10 1
");
        assert_eq!(result.unwrap(), 5);
        assert_eq!(
            out,
            "The order has been accepted in the system\n\
             The product does not exist in the system\n\
             The order has been accepted in the system\n"
        );
        assert_eq!(store.order(OrderId::FIRST).unwrap().customer_id().get(), -5);
        assert_eq!(store.product(ProductId::from_u64(10)).unwrap().quantity(), 3);
    }

    #[test]
    fn search_prints_matches_cheapest_first() {
        let (_, result, out) = run("\
register supplier 1 S Haifa Port
add 10 Blue_Mug 9 1 5
update 11 Red_Mug 4.5 1 5
add 12 Plate 1 1 5
search Mug
search Mug 5
");
        result.unwrap();
        assert_eq!(
            out,
            "Product(id=11, name='Red Mug', price=4.5, supplier_id=1, quantity=5)\n\
             Product(id=10, name='Blue Mug', price=9, supplier_id=1, quantity=5)\n\
             Product(id=11, name='Red Mug', price=4.5, supplier_id=1, quantity=5)\n"
        );
    }

    #[test]
    fn insufficient_stock_is_reported_not_fatal() {
        let (store, result, out) = run("\
register supplier 1 S Haifa Port
add 10 Cushion 20 1 1
order 7 10 2
");
        assert_eq!(result.unwrap(), 3);
        assert_eq!(
            out,
            "The quantity requested for this product is greater than the quantity in stock\n"
        );
        assert_eq!(store.orders().count(), 0);
    }

    #[test]
    fn removing_the_order_unblocks_the_product() {
        let (store, result, _) = run("\
register supplier 1 S Haifa Port
add 10 Cushion 20 1 5
order 7 10 5
remove order 1
remove product 10
");
        result.unwrap();
        assert!(store.product(ProductId::from_u64(10)).is_none());
        assert!(store.order(OrderId::FIRST).is_none());
        assert_eq!(store.next_order_id(), OrderId::from_u64(2));
    }

    #[test]
    fn unknown_command_aborts_with_line_number() {
        let (store, result, _) = run("\
register customer 1 A B C

refund 1
register customer 2 D E F
");
        let err = result.unwrap_err();
        assert!(matches!(err, ReplayError::UnknownCommand { line: 3, ref command } if command == "refund"));
        assert_eq!(err.line(), Some(3));
        assert!(store.customer(PartyId::from_u64(2)).is_none());
    }

    #[test]
    fn domain_failures_abort() {
        let (_, result, _) = run("\
register customer 1 A B C
register supplier 1 D E F
");
        match result.unwrap_err() {
            ReplayError::Domain { line, source } => {
                assert_eq!(line, 2);
                assert!(matches!(source, DomainError::InvalidId(_)));
            }
            other => panic!("Expected domain failure, got {other:?}"),
        }

        let (_, result, _) = run("add 10 Cushion 20 1 5\n");
        assert!(matches!(
            result.unwrap_err(),
            ReplayError::Domain { source: DomainError::InvalidId(_), .. }
        ));

        let (_, result, _) = run("register supplier 1 S Haifa Port\nadd 10 Cushion -20 1 5\n");
        assert!(matches!(
            result.unwrap_err(),
            ReplayError::Domain { source: DomainError::InvalidPrice(_), .. }
        ));
    }

    #[test]
    fn dependency_blocked_removal_aborts() {
        let (store, result, _) = run("\
register supplier 1 S Haifa Port
add 10 Cushion 20 1 5
order 7 10
remove supplier 1
");
        assert!(matches!(
            result.unwrap_err(),
            ReplayError::Domain { line: 4, source: DomainError::DependencyExists(_) }
        ));
        assert!(store.supplier(PartyId::from_u64(1)).is_some());
    }

    #[test]
    fn malformed_lines_abort() {
        let (_, result, _) = run("order seven 10\n");
        assert!(matches!(result.unwrap_err(), ReplayError::Malformed { line: 1, .. }));
    }
}
