pub mod trieve_client;
