pub mod help;
pub mod list;
pub mod upgrade;

pub use help::HelpHandler;
pub use list::ListHandler;
pub use upgrade::UpgradeHandler;
