pub const API_NAME: &str = "[car-api]";

/// Database holding the car collection. The connection URL's database is ignored.
pub const DATABASE_NAME: &str = "car_db";

/// Table holding car documents; `migrations/` creates it under this name.
pub const CARS_COLLECTION: &str = "cars";
