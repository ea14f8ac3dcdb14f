// HTTP handlers (controllers)
// Thin adapters: extract input, call the service, shape the response

pub mod docs;
pub mod health;
pub mod teams;
