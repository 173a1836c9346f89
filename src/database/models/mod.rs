pub mod map;
pub mod point;
pub mod user;

pub use map::{Map, MapSummary, NewMap};
pub use point::{NewPoint, Point};
pub use user::User;
