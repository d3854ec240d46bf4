use serde::Serialize;

/// Serializes any engine result as pretty-printed JSON.
pub fn render<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

pub fn print<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<()> {
    let json = render(value)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use taxguide_core::{CompanyTaxResult, EntityTier};

    use super::*;

    #[test]
    fn render_keeps_decimals_exact() {
        let result = CompanyTaxResult {
            tier: EntityTier::Large,
            cit_rate: dec!(0.30),
            cit: dec!(300000),
            development_levy: dec!(40000),
            total_tax: dec!(340000),
            effective_rate: dec!(34.00),
        };

        let json = render(&result).unwrap();

        assert!(json.contains("\"tier\": \"large\""));
        assert!(json.contains("\"cit_rate\": \"0.30\""));
        assert!(json.contains("\"effective_rate\": \"34.00\""));
    }
}
