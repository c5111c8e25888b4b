//! Common library for the content publisher
//!
//! This crate provides functionality shared by the services of the
//! workspace: settings loading, the outbound client error taxonomy, and
//! HTTP authentication helpers.
//!
//! ```rust,no_run
//! use common::{
//!     auth::basic_auth,
//!     config::{Settings, load_dotenv},
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     load_dotenv();
//!     let settings = Settings::load()?;
//!     let header = basic_auth(&settings.wordpress_username, &settings.wordpress_password);
//!     println!("{} -> {}", settings.wordpress_url, header);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
