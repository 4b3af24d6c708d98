//! Shell-level parsing: tokenizing a command line into words

pub mod tokenizer;
pub mod word;

pub use tokenizer::{tokenize, tokenize_all, Token, Tokenizer};
pub use word::{EnvRef, Word, WordPart};
