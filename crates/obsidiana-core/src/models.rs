mod brand;
mod token;
mod tree;

pub use brand::{Brand, TokenCategory};
pub use token::{Token, TokenType, TokenValue};
pub use tree::{TokenNode, TokenPath, TokenTree};
