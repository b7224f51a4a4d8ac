use std::fmt::Display;
use std::ops::RangeInclusive;

/// Record `field` as invalid unless `value` lies in `allowed`.
///
/// Works for integers and floats alike; a NaN float is never in range.
pub(crate) fn check_range<T>(
    errors: &mut Vec<String>,
    field: &str,
    value: T,
    allowed: RangeInclusive<T>,
) where
    T: PartialOrd + Display,
{
    if !allowed.contains(&value) {
        errors.push(format!(
            "{field} = {value} is out of range [{}, {}]",
            allowed.start(),
            allowed.end()
        ));
    }
}
