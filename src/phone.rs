/// Rewrite a UK national number (`07123456789`) into E.164 (`+447123456789`).
///
/// Anything that is not an 11-character number starting with `0` is returned
/// untouched, including numbers already carrying `+44`.
pub fn format_uk_number(number: &str) -> String {
    if number.starts_with('0') && number.chars().count() == 11 {
        return format!("+44{}", &number[1..]);
    }
    number.to_string()
}
