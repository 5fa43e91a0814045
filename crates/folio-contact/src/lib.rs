//! Contact form submission.
//!
//! A single JSON route, `POST /api/contact`, validates the payload against
//! [`ContactForm`]'s rules and hands it to a [`ContactStorage`].

mod form;
mod routes;
mod storage;

pub use form::ContactForm;
pub use routes::{router, serve, ContactResponse, CONTACT_PATH};
pub use storage::{ContactMessage, ContactStorage, MemoryContactStorage};
