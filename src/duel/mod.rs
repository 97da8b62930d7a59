pub mod create;
pub mod error;
pub mod format;
pub mod game_screen;
pub mod lobby;
pub mod odds;
pub mod simulator;
pub mod types;

pub use create::*;
pub use error::*;
pub use format::*;
pub use game_screen::*;
pub use lobby::*;
pub use odds::*;
pub use simulator::*;
pub use types::*;
