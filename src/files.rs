// 📂 File I/O - sales log input, CSV / pipe exports, report output
//
// Readers fail with a typed PipelineError when the input is absent.
// Writers create missing parent directories before opening the file.

use crate::error::PipelineError;
use crate::parser::FIELD_DELIMITER;
use crate::transaction::{EnrichedTransaction, Transaction, ENRICHED_COLUMNS, TRANSACTION_COLUMNS};
use anyhow::{anyhow, Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const NULL_FIELD: &str = "None";

// ============================================================================
// INPUT
// ============================================================================

/// Read the raw sales log: header dropped, lines trimmed, blank lines skipped
pub fn read_sales_data(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(PipelineError::InputMissing(path.to_path_buf()).into());
    }

    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read sales data: {}", path.display()))?;
    let text = decode_text(&bytes);

    let lines: Vec<String> = text
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if lines.is_empty() {
        return Err(PipelineError::InputEmpty(path.to_path_buf()).into());
    }

    log::debug!("read {} data lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// UTF-8 first, Latin-1 when the bytes are not valid UTF-8.
/// Latin-1 maps every byte, so 0x80-0x9F stay C1 controls.
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(e) => {
            log::info!("input is not UTF-8 ({}), decoding as Latin-1", e);
            encoding_rs::mem::decode_latin1(bytes)
        }
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Comma-delimited export of the valid transactions, header always present
pub fn save_clean_data(path: &Path, transactions: &[Transaction]) -> Result<()> {
    ensure_parent_dir(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    writer
        .write_record(TRANSACTION_COLUMNS)
        .context("Failed to write CSV header")?;
    for tx in transactions {
        writer
            .serialize(tx)
            .with_context(|| format!("Failed to write transaction {}", tx.transaction_id))?;
    }
    writer.flush().context("Failed to flush CSV file")?;

    Ok(())
}

/// Pipe-delimited export of the enriched rows.
///
/// Returns the number of rows written. An empty input writes nothing and
/// leaves any existing file untouched.
pub fn save_enriched_data(path: &Path, enriched: &[EnrichedTransaction]) -> Result<usize> {
    if enriched.is_empty() {
        return Ok(0);
    }
    ensure_parent_dir(path)?;

    let mut writer = pipe_writer_builder()
        .from_path(path)
        .with_context(|| format!("Failed to create enriched file: {}", path.display()))?;

    writer
        .write_record(ENRICHED_COLUMNS)
        .context("Failed to write enriched header")?;
    for row in enriched {
        writer
            .write_record(enriched_fields(row))
            .with_context(|| format!("Failed to write transaction {}", row.transaction.transaction_id))?;
    }
    writer.flush().context("Failed to flush enriched file")?;

    Ok(enriched.len())
}

fn pipe_writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(FIELD_DELIMITER as u8)
        .quote_style(csv::QuoteStyle::Never);
    builder
}

fn enriched_fields(row: &EnrichedTransaction) -> [String; 12] {
    let tx = &row.transaction;
    [
        tx.transaction_id.clone(),
        tx.date.clone(),
        tx.product_id.clone(),
        tx.product_name.clone(),
        tx.quantity.to_string(),
        format_float(tx.unit_price),
        tx.customer_id.clone(),
        tx.region.clone(),
        row.api_category.clone().unwrap_or_else(|| NULL_FIELD.to_string()),
        row.api_brand.clone().unwrap_or_else(|| NULL_FIELD.to_string()),
        row.api_rating.map(format_float).unwrap_or_else(|| NULL_FIELD.to_string()),
        if row.api_match { "True" } else { "False" }.to_string(),
    ]
}

/// Shortest round-trip form, always with a decimal point: `10` → `10.0`
pub fn format_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// Read an enriched export back, `None` fields becoming nulls
pub fn load_enriched_data(path: &Path) -> Result<Vec<EnrichedTransaction>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER as u8)
        .quoting(false)
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open enriched file: {}", path.display()))?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read row {}", idx + 2))?;
        let row = parse_enriched_record(&record).with_context(|| format!("Invalid row {}", idx + 2))?;
        rows.push(row);
    }

    Ok(rows)
}

fn parse_enriched_record(record: &csv::StringRecord) -> Result<EnrichedTransaction> {
    let fields: Vec<&str> = record.iter().collect();
    let [transaction_id, date, product_id, product_name, quantity, unit_price, customer_id, region, category, brand, rating, matched] =
        fields.as_slice()
    else {
        return Err(anyhow!("expected {} fields, found {}", ENRICHED_COLUMNS.len(), fields.len()));
    };

    let nullable = |value: &str| (value != NULL_FIELD).then(|| value.to_string());

    let api_rating = match nullable(*rating) {
        Some(raw) => Some(raw.parse::<f64>().with_context(|| format!("bad API_Rating: {}", raw))?),
        None => None,
    };
    let api_match = match *matched {
        "True" => true,
        "False" => false,
        other => return Err(anyhow!("bad API_Match: {}", other)),
    };

    Ok(EnrichedTransaction {
        transaction: Transaction {
            transaction_id: transaction_id.to_string(),
            date: date.to_string(),
            product_id: product_id.to_string(),
            product_name: product_name.to_string(),
            quantity: quantity
                .parse()
                .with_context(|| format!("bad Quantity: {}", quantity))?,
            unit_price: unit_price
                .parse()
                .with_context(|| format!("bad UnitPrice: {}", unit_price))?,
            customer_id: customer_id.to_string(),
            region: region.to_string(),
        },
        api_category: nullable(*category),
        api_brand: nullable(*brand),
        api_rating,
        api_match,
    })
}

pub fn save_report(path: &Path, report: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, report).with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
