pub mod use_dataset_pages;
