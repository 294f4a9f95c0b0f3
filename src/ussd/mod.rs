pub mod locks;
pub mod menu;
pub mod request;
pub mod response;
pub mod service;
pub mod store;
pub mod text;

pub use request::UssdRequest;
pub use service::UssdService;
pub use store::InMemorySessionStore;
