pub mod configure;
pub mod deploy;
pub mod exit;
pub mod prelude;
pub mod rewards;
pub mod sign;
pub mod stake;
pub mod status;
pub mod upgrade;
