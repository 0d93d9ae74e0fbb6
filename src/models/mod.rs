mod bundle;
mod pair;
mod token;

pub use bundle::Bundle;
pub use pair::{Pair, PairSide};
pub use token::Token;
