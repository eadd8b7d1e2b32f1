pub mod auth;

pub mod users;

pub mod modules;

pub mod secret_codes;

pub mod copies;

pub mod marks;

pub mod results;

pub use auth::configure_auth_routes;
pub use copies::configure_copies_routes;
pub use marks::configure_marks_routes;
pub use modules::configure_modules_routes;
pub use results::configure_results_routes;
pub use secret_codes::configure_secret_codes_routes;
pub use users::configure_user_routes;
