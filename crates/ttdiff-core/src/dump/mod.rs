//! Dump text ingestion: tokenizer, lexer and snapshot parser

pub mod lexer;
pub mod parser;
pub mod tokenizer;

pub use lexer::DumpLexer;
pub use parser::{parse_snapshot_bytes, parse_snapshot_reader, parse_snapshot_str};
pub use tokenizer::{Dialect, PlainDialect, Tokenizer};
