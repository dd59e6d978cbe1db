pub mod home_page;
pub mod datasets_page;
