mod game_outcome;
pub use game_outcome::*;

mod game_result;
pub use game_result::*;
