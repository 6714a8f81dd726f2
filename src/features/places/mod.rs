//! Places feature: the point-of-interest collection and its maintenance.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/places` | List places (`?type=` filter) |
//! | GET | `/api/places/{id}` | Get a place |
//! | POST | `/api/places` | Create a place |
//! | PUT | `/api/places/{id}` | Update a place |
//! | DELETE | `/api/places/{id}` | Delete a place |
//! | GET | `/api/types` | Distinct place types |
//! | POST | `/api/save` | Rewrite the data file |
//! | GET | `/api/export` | Export with metadata |
//! | POST | `/api/backup` | Timestamped backup |
//!
//! Every `/api/places` route is also served under `/api/positions`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;

pub use services::PlaceService;
