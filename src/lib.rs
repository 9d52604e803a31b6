pub mod app;
pub mod config;
pub mod error;
pub mod state;
pub mod enums {
    pub mod error_code;
    pub mod http_status;
}
pub mod api {
    pub mod boundary;
    pub mod errors;
    pub mod extract;
    pub mod health;
}
pub mod db {
    pub mod account_repository;
    pub mod connection;
    pub mod models;
    pub mod user_repository;
    pub mod workspace_repository;
}
pub mod utils {
    pub mod invite_code;
    pub mod password;
}
