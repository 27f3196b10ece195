//! Console argument parsing

use super::CommandError;

/// Finite decimal number
pub fn parse_number(arg: &str) -> Result<f64, CommandError> {
    match arg.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CommandError::NotANumber),
    }
}

/// Non-negative integer
pub fn parse_whole_number(arg: &str) -> Result<u32, CommandError> {
    arg.trim().parse::<u32>().map_err(|_| CommandError::NotAWholeNumber)
}

/// `true` or `false`, any case
pub fn parse_bool(arg: &str) -> Result<bool, CommandError> {
    let arg = arg.trim();
    if arg.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if arg.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(CommandError::NotABool)
    }
}
