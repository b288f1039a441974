use anyhow::Result;

use super::ui;
use crate::converter::{Conversion, CurrencyConverter};
use crate::provider::RateSource;

/// Performs one conversion and prints the outcome.
pub async fn run<S: RateSource>(
    converter: &CurrencyConverter<S>,
    from: &str,
    to: &str,
    amount: &str,
) -> Result<()> {
    match converter.convert(from, to, amount).await? {
        Conversion::SameCurrency => {
            println!(
                "{}",
                ui::style_text(
                    "Same currency codes used: conversion not required.",
                    ui::StyleType::Subtle
                )
            );
        }
        Conversion::Converted(value) => {
            // Codes were validated by convert, so both names resolve.
            let from_name = converter.currency_name(from)?;
            let to_name = converter.currency_name(to)?;
            let amount_value = amount.trim().parse::<f64>().unwrap_or(1.0);

            println!(
                "{} {} ({}) = {} {} ({})",
                amount_value,
                from,
                from_name,
                ui::style_text(&value.to_string(), ui::StyleType::ResultValue),
                to,
                to_name
            );
        }
    }
    Ok(())
}
