pub mod chat;
pub mod filters;
pub mod session;

pub use chat::ChatStore;
pub use filters::FilterStore;
pub use session::Session;
