pub mod car;

pub use car::{parse_car_id, Car, CarFields};
