/// Decimal places used for persisted money values
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Lowest floor index covered by a valorization curve (ground floor)
pub const FLOOR_MIN: i32 = 0;

/// Highest floor index covered by a valorization curve
pub const FLOOR_MAX: i32 = 20;

/// Solar-orientation factor that leaves the value untouched
pub const NEUTRAL_ORIENTATION_FACTOR: f64 = 1.0;

/// Minimum length accepted for development and parameter-set names
pub const MIN_NAME_LENGTH: usize = 3;
