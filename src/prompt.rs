// 💬 Filter Prompt - interactive collection of FilterCriteria
//
// Generic over the reader/writer pair so the same code drives stdin/stdout
// and in-memory buffers. End of input counts as an empty answer.

use crate::report::format_currency;
use crate::validation::{FilterCriteria, FilterOptions};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Print what the user can filter on
pub fn display_filter_options<W: Write>(out: &mut W, options: &FilterOptions) -> Result<()> {
    writeln!(out, "   Regions: {}", options.regions.join(", "))?;
    writeln!(
        out,
        "   Amount Range: ${} - ${}",
        format_currency(options.min_amount),
        format_currency(options.max_amount)
    )?;
    Ok(())
}

/// Ask whether to filter and, if so, for each criterion.
///
/// Blank answers leave a criterion unset; an unparsable amount prints a
/// notice and is ignored.
pub fn prompt_filters<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<FilterCriteria> {
    let choice = ask(input, out, "\n   Do you want to filter data? (y/n): ")?;
    if !choice.eq_ignore_ascii_case("y") {
        return Ok(FilterCriteria::none());
    }

    writeln!(out, "\n   --- Enter Filter Criteria (Press Enter to skip) ---")?;

    let mut criteria = FilterCriteria::none();

    let region = ask(input, out, "   Region: ")?;
    if !region.is_empty() {
        criteria = criteria.with_region(&region);
    }
    if let Some(min) = ask_amount(input, out, "   Min Amount: ", "min")? {
        criteria = criteria.with_min_amount(min);
    }
    if let Some(max) = ask_amount(input, out, "   Max Amount: ", "max")? {
        criteria = criteria.with_max_amount(max);
    }

    log::debug!("filter criteria from prompt: {:?}", criteria);
    Ok(criteria)
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<String> {
    write!(out, "{}", question)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer).context("Failed to read answer")?;
    Ok(answer.trim().to_string())
}

fn ask_amount<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
    bound: &str,
) -> Result<Option<f64>> {
    let answer = ask(input, out, question)?;
    if answer.is_empty() {
        return Ok(None);
    }

    match answer.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => {
            writeln!(out, "   (Invalid number, ignoring {} amount)", bound)?;
            Ok(None)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
