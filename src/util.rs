/// Numeric reinterpretation helpers.
///
/// The language has one number type, a 64-bit float; bit operators and
/// index arithmetic reinterpret it as 64-bit integers. These helpers keep
/// the reinterpretation rules in one place.
pub mod num;
