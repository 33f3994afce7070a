use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Canonical text encoding of a zero amount
pub const ZERO_AMOUNT_TEXT: &str = "0x0";

/// Absolute fiat value below which a total renders as the negligible placeholder
pub const NEGLIGIBLE_FIAT_THRESHOLD: Decimal = dec!(0.01);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for fiat numbers that are not displayed directly
pub const FIAT_NUMBER_PRECISION: u32 = 5;

/// Fraction digits kept when rendering token amounts
pub const TOKEN_DISPLAY_DECIMALS: u32 = 5;

/// Largest unit scale accepted when converting minimal units
pub const MAX_UNIT_SCALE: u32 = 28;

/// Default display currency
pub const DEFAULT_CURRENCY: &str = "USD";

/// Default locale
pub const DEFAULT_LOCALE: &str = "en-US";

/// Native token of the default chain family
pub const DEFAULT_NATIVE_SYMBOL: &str = "ETH";

/// Decimals of the native token (wei per ether)
pub const DEFAULT_NATIVE_DECIMALS: u32 = 18;
