//! Fixed-point amounts - exact balance arithmetic and unit conversions.

mod amount_errors;
mod amount_model;
mod unit_conversion;

pub use amount_errors::AmountError;
pub use amount_model::Amount;
pub use unit_conversion::{
    minimal_unit_to_fiat, minimal_unit_to_fiat_number, render_from_minimal_unit,
};
