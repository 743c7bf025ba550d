//! Command handlers -- one module per subcommand

pub mod filter;
pub mod ingest;
pub mod init_db;
pub mod last;
pub mod stats;
pub mod top;
