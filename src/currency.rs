//! Display formatting for money amounts.

use numfmt::{Formatter, Precision};

use crate::Error;

/// Formats amounts as `<symbol><thousands-separated whole>.<cents>`, e.g. `₹1,234.50`.
pub struct CurrencyFormatter {
    symbol: String,
    whole_fmt: Formatter,
}

impl CurrencyFormatter {
    /// Create a formatter that prefixes amounts with `symbol`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidCurrencySymbol] if `symbol` is too long to be
    /// used as a prefix.
    pub fn new(symbol: &str) -> Result<Self, Error> {
        let whole_fmt = Formatter::currency(symbol)
            .map_err(|_| Error::InvalidCurrencySymbol(symbol.to_owned()))?
            .precision(Precision::Decimals(0));

        Ok(Self {
            symbol: symbol.to_owned(),
            whole_fmt,
        })
    }

    /// The prefix placed before every amount.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Format `amount` with two decimal places.
    ///
    /// Amounts too large to count in whole cents, and non-finite amounts, are
    /// written out in full without thousands separators.
    pub fn format(&self, amount: f64) -> String {
        let scaled = (amount.abs() * 100.0).round();

        if !scaled.is_finite() || scaled >= u64::MAX as f64 {
            let sign = if amount.is_sign_negative() { "-" } else { "" };
            return format!("{sign}{}{:.2}", self.symbol, amount.abs());
        }

        let cents = scaled as u64;
        let (whole, fraction) = (cents / 100, cents % 100);

        // numfmt renders zero as a bare "0" without the prefix.
        let whole_str = if whole == 0 {
            format!("{}0", self.symbol)
        } else {
            self.whole_fmt.fmt_string(whole as f64)
        };

        let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

        format!("{sign}{whole_str}.{fraction:02}")
    }
}

impl std::fmt::Debug for CurrencyFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyFormatter")
            .field("symbol", &self.symbol)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::currency::CurrencyFormatter;

    fn rupees() -> CurrencyFormatter {
        CurrencyFormatter::new("₹").unwrap()
    }

    #[test]
    fn formats_whole_amount_with_two_decimals() {
        assert_eq!(rupees().format(180.0), "₹180.00");
    }

    #[test]
    fn keeps_trailing_zero_on_cents() {
        assert_eq!(rupees().format(4.5), "₹4.50");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(rupees().format(0.0), "₹0.00");
    }

    #[test]
    fn formats_amount_below_one() {
        assert_eq!(rupees().format(0.75), "₹0.75");
    }

    #[test]
    fn separates_thousands() {
        assert_eq!(rupees().format(1234.5), "₹1,234.50");
    }

    #[test]
    fn rounds_to_nearest_cent() {
        assert_eq!(rupees().format(2.999), "₹3.00");
    }

    #[test]
    fn formats_negative_amount() {
        assert_eq!(CurrencyFormatter::new("$").unwrap().format(-12.3), "-$12.30");
    }

    #[test]
    fn formats_amount_beyond_cent_range_in_full() {
        let formatted = rupees().format(1e20);

        assert_eq!(formatted, "₹100000000000000000000.00");
    }

    #[test]
    fn formats_infinity_without_saturating() {
        assert_eq!(rupees().format(f64::INFINITY), "₹inf");
    }
}
