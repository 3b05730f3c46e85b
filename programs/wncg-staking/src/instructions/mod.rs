pub mod initialise_configs;
pub use initialise_configs::*;

pub mod update_configs;
pub use update_configs::*;

pub mod config_collaborators;
pub use config_collaborators::*;

pub mod stake;
pub use stake::*;

pub mod withdraw;
pub use withdraw::*;

pub mod cooldown;
pub use cooldown::*;

pub mod claim;
pub use claim::*;

pub mod earmark;
pub use earmark::*;

pub mod views;
pub use views::*;
