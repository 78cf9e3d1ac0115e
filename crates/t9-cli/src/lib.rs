pub mod commands;
pub mod corpus_io;
pub mod trace_init;
