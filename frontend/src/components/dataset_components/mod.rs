pub mod dataset_overview;
pub mod dataset_row;
pub mod pagination_arrows;
