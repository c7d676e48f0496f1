pub mod csv;
pub mod domain;
pub mod run_csv_stream;
pub mod store;
