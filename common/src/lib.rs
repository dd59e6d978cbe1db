//! Common library exports shared between frontend and backend.

extern crate serde;


pub mod dataset;
pub mod dataset_const;
pub mod dataset_fetch;
pub mod dataset_pages;
pub mod dataset_view;
pub mod fuzzy_search;
