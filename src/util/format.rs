/// Two decimals with thousands separators, e.g. `14,685.67`.
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && fixed.chars().any(|ch| ch.is_ascii_digit() && ch != '0');
    format!("{}{grouped}.{fraction}", if negative { "-" } else { "" })
}

/// Amount in the base currency, ASCII only so it survives the PDF base fonts.
pub fn format_npr(value: f64) -> String {
    format!("NPR {}", format_money(value))
}

pub fn format_percent(rate: f64) -> String {
    format!("{rate}%")
}

pub fn format_cbm(cubic_meters: f64) -> String {
    format!("{cubic_meters:.3} CBM")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_is_grouped_and_rounded() {
        assert_eq!(format_money(14685.06675), "14,685.07");
        assert_eq!(format_money(0.06675), "0.07");
        assert_eq!(format_money(667.5), "667.50");
        assert_eq!(format_money(1_234_567.0), "1,234,567.00");
        assert_eq!(format_money(-1500.0), "-1,500.00");
        assert_eq!(format_money(-0.001), "0.00");
        assert_eq!(format_money(f64::NAN), "n/a");
    }

    #[test]
    fn percent_drops_trailing_zeros() {
        assert_eq!(format_percent(5.0), "5%");
        assert_eq!(format_percent(0.005), "0.005%");
        assert_eq!(format_percent(12.5), "12.5%");
    }

    #[test]
    fn cbm_has_three_decimals() {
        assert_eq!(format_cbm(0.06), "0.060 CBM");
    }
}
