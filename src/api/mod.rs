mod handlers;
mod routes;
mod state;

pub use routes::{create_router, REQUEST_ID_HEADER};
pub use state::AppState;
