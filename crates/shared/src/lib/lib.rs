pub mod authorization;
pub mod consts;
pub mod digest;
pub mod io;
pub mod stake_request;
