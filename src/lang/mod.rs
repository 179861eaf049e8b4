/*!
# Rust Language Module

This Rust module reads source text: input streams, tokens and errors.

*/

#[macro_use]
mod error;
mod stream;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use stream::{FileStream, LineSource, LineStream, Stream, TextStream};
pub use token::{is_whitespace, next_token, parse_number, skip_whitespace, MAX_TOKEN_LEN};

#[cfg(test)]
mod tests;
