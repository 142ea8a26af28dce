pub mod connection;
pub mod handler;
pub mod listener;

pub use connection::next_connection_id;
pub use handler::spawn_handler;
pub use listener::create_tcp_listener;
