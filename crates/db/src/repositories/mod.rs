//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod pinp_repo;
pub mod ppm_repo;
pub mod ppp_arc_repo;
pub mod ppp_repo;
pub mod preq_repo;

pub use pinp_repo::PinpRepo;
pub use ppm_repo::PpmRepo;
pub use ppp_arc_repo::PppArcRepo;
pub use ppp_repo::PppRepo;
pub use preq_repo::PreqRepo;
