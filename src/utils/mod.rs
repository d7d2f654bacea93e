pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Groups the integer part and keeps up to three fractional digits, trailing
/// zeros removed.
pub fn format_decimal(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let value = value.max(0.0);
    let rounded = (value * 1000.0).round() / 1000.0;
    let whole = rounded.trunc();
    let frac = ((rounded - whole) * 1000.0).round() as u64;
    let mut out = format_thousands(whole as u64);
    if frac > 0 {
        let frac = format!("{frac:03}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}
