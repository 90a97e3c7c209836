mod flash;
mod handlers;
mod pages;
mod proxy;
mod routes;
mod types;

pub use routes::gate_routes;
pub use types::LoginForm;
