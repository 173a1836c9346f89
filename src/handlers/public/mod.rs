pub mod health;
pub mod maps;
pub mod session;
pub mod users;

pub use health::health;
pub use maps::{index, map_points_json, map_show};
pub use session::{login, logout};
pub use users::users_router;
