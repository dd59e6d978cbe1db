//! Upstream dataset API access and the organization dataset pager.

pub mod api;
pub mod client_utils;
pub mod dataset_pager;
