mod edge_handler;
pub mod handler_source;

pub use edge_handler::EdgeHandler;
pub use handler_source::HandlerSourceError;
