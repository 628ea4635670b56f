//! Domain models shared by the data, service, bot and HTTP layers.
//!
//! Repositories convert SeaORM entity models into these types at the data boundary, so JSON
//! payload columns are decoded into typed structs and stored timestamps into `DateTime<Utc>`
//! before any other layer sees them.

pub mod api;
pub mod settings;
pub mod ticket;
pub mod transcript;
