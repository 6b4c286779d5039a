//! Core use-case services.
//!
//! # Responsibility
//! - Validate user input before it reaches the table.
//! - Assemble paginated views from table reads.

pub mod food_service;
pub mod paging;
