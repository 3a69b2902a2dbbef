//! Input Masks
//!
//! Pure `format_*` (raw → display) and `parse_*` (display → raw) pairs for
//! the masked inputs. Formatting is progressive: partial input gets only the
//! separators it has reached, so the functions can run on every keystroke.

/// Keep ASCII digits only
pub fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Insert `sep` after each group of `sizes` digits, as long as more digits
/// follow. Extra digits past the last group are dropped.
fn group(digits: &str, sizes: &[usize], seps: &[char]) -> String {
    let max: usize = sizes.iter().sum();
    let mut out = String::with_capacity(max + seps.len());
    let mut boundary = 0;
    let mut next_group = 0;
    for (i, d) in digits.chars().take(max).enumerate() {
        if next_group < seps.len() && i == boundary + sizes[next_group] {
            out.push(seps[next_group]);
            boundary = i;
            next_group += 1;
        }
        out.push(d);
    }
    out
}

/// `12345678000190` → `12.345.678/0001-90`
pub fn format_cnpj(value: &str) -> String {
    group(&digits(value), &[2, 3, 3, 4, 2], &['.', '.', '/', '-'])
}

pub fn parse_cnpj(display: &str) -> String {
    digits(display).chars().take(14).collect()
}

/// `47998765432` → `(47) 99876-5432`; ten digits format as a landline
/// `(47) 3433-1234`
pub fn format_phone(value: &str) -> String {
    let d: String = digits(value).chars().take(11).collect();
    if d.len() <= 2 {
        return d;
    }
    let (area, rest) = d.split_at(2);
    let first = if d.len() == 10 { 4 } else { 5 };
    let local = group(rest, &[first, 4], &['-']);
    format!("({area}) {local}")
}

pub fn parse_phone(display: &str) -> String {
    digits(display).chars().take(11).collect()
}

/// `89201100` → `89201-100`
pub fn format_cep(value: &str) -> String {
    group(&digits(value), &[5, 3], &['-'])
}

pub fn parse_cep(display: &str) -> String {
    digits(display).chars().take(8).collect()
}

/// `1234.5` → `R$ 1.234,50`
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let int = (cents / 100).to_string();
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{:02}", cents % 100)
}

/// Read `R$ 1.234,50`, `1234,5` or `1234.5` back into a number
///
/// With a comma present, dots are thousands separators; without one, a
/// single dot is the decimal point.
pub fn parse_brl(display: &str) -> Option<f64> {
    let s = display.trim().trim_start_matches("R$").trim();
    if s.is_empty() {
        return None;
    }
    let normalized = if s.contains(',') {
        s.replace('.', "").replace(',', ".")
    } else {
        s.to_string()
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
