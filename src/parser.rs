// 🏗️ Parser - pipe-delimited sales lines → typed transactions
//
// Line format (header already stripped by the caller):
//   TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region
//
// Malformed lines are dropped silently; the only trace is a debug log entry.

use crate::transaction::{Transaction, TRANSACTION_COLUMNS};

/// Field separator for both the input log and the enriched export
pub const FIELD_DELIMITER: char = '|';

/// Why a line was thrown away
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineDefect {
    FieldCount(usize),
    Quantity(String),
    UnitPrice(String),
}

/// Parse a single line, reporting why it was rejected
pub fn parse_line(line: &str) -> Result<Transaction, LineDefect> {
    let fields: Vec<&str> = line.trim().split(FIELD_DELIMITER).collect();

    let [transaction_id, date, product_id, product_name, quantity, unit_price, customer_id, region] =
        fields.as_slice()
    else {
        return Err(LineDefect::FieldCount(fields.len()));
    };

    // Thousands separators ("1,200") are stripped before conversion
    let quantity = strip_separators(quantity)
        .parse::<i64>()
        .map_err(|_| LineDefect::Quantity(quantity.to_string()))?;
    let unit_price = strip_separators(unit_price)
        .parse::<f64>()
        .map_err(|_| LineDefect::UnitPrice(unit_price.to_string()))?;

    Ok(Transaction {
        transaction_id: transaction_id.to_string(),
        date: date.to_string(),
        product_id: product_id.to_string(),
        // Commas would break the delimited exports downstream
        product_name: product_name.replace(',', " "),
        quantity,
        unit_price,
        customer_id: customer_id.to_string(),
        region: region.to_string(),
    })
}

/// Parse every line in order, silently discarding the malformed ones.
///
/// The output never has more records than the input had lines, and keeps
/// input order. No duplicate detection happens here.
pub fn parse_transactions<S: AsRef<str>>(lines: &[S]) -> Vec<Transaction> {
    let mut transactions = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        match parse_line(line.as_ref()) {
            Ok(tx) => transactions.push(tx),
            Err(defect) => {
                // +2: 1-indexed, plus the header row
                log::debug!("discarding data line {}: {:?}", idx + 2, defect);
            }
        }
    }

    log::debug!(
        "parsed {} of {} lines ({} columns expected)",
        transactions.len(),
        lines.len(),
        TRANSACTION_COLUMNS.len()
    );

    transactions
}

fn strip_separators(raw: &str) -> String {
    raw.trim().replace(',', "")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_line() {
        let tx = parse_line("T1|2024-01-01|P1|Widget|2|10.00|C1|West").unwrap();

        assert_eq!(tx.transaction_id, "T1");
        assert_eq!(tx.date, "2024-01-01");
        assert_eq!(tx.product_id, "P1");
        assert_eq!(tx.product_name, "Widget");
        assert_eq!(tx.quantity, 2);
        assert_eq!(tx.unit_price, 10.0);
        assert_eq!(tx.customer_id, "C1");
        assert_eq!(tx.region, "West");
        assert_eq!(tx.amount(), 20.0);
    }

    #[test]
    fn test_thousands_separators_are_stripped() {
        let tx = parse_line("T2|2024-01-02|P2|Monitor|1,200|1,916.00|C2|East").unwrap();

        assert_eq!(tx.quantity, 1200);
        assert_eq!(tx.unit_price, 1916.0);
    }

    #[test]
    fn test_commas_in_product_name_become_spaces() {
        let tx = parse_line("T3|2024-01-03|P3|Mouse,Wireless|1|20|C3|South").unwrap();
        assert_eq!(tx.product_name, "Mouse Wireless");
    }

    #[test]
    fn test_wrong_field_count_is_rejected() {
        let result = parse_line("T4|2024-01-04|P4|Keyboard|1|20|C4");
        assert_eq!(result, Err(LineDefect::FieldCount(7)));

        let result = parse_line("T4|2024-01-04|P4|Keyboard|1|20|C4|North|extra");
        assert_eq!(result, Err(LineDefect::FieldCount(9)));
    }

    #[test]
    fn test_non_numeric_fields_are_rejected() {
        assert!(matches!(
            parse_line("T5|2024-01-05|P5|Cable|two|20|C5|North"),
            Err(LineDefect::Quantity(_))
        ));
        assert!(matches!(
            parse_line("T5|2024-01-05|P5|Cable|2|abc|C5|North"),
            Err(LineDefect::UnitPrice(_))
        ));
    }

    #[test]
    fn test_invalid_values_still_parse() {
        // Semantic checks belong to validation, not parsing
        let tx = parse_line("X9|2024-01-06|P6|Webcam|0|-5|C6|").unwrap();
        assert_eq!(tx.quantity, 0);
        assert_eq!(tx.unit_price, -5.0);
        assert_eq!(tx.region, "");
    }

    #[test]
    fn test_short_line_does_not_affect_neighbours() {
        let lines = vec![
            "T1|2024-01-01|P1|Widget|2|10.00|C1|West",
            "T2|2024-01-01|P2|Gadget|1|5.00|C2",
            "T3|2024-01-02|P3|Gizmo|4|2.50|C3|East",
        ];

        let txs = parse_transactions(&lines);

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].transaction_id, "T1");
        assert_eq!(txs[1].transaction_id, "T3");
    }

    #[test]
    fn test_parse_empty_input() {
        let lines: Vec<String> = Vec::new();
        assert!(parse_transactions(&lines).is_empty());
    }
}
