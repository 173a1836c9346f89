// Every route here is mounted behind `middleware::require_session`, so each
// handler may rely on `Extension<AuthUser>` being present.
pub mod maps;
pub mod points;
pub mod users;

pub use maps::{map_create, map_delete, map_edit_form, map_new_form};
pub use points::{point_add, point_delete, point_edit};
pub use users::{favourite_add, favourite_remove, user_profile};
