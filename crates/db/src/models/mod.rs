pub mod pinp;
pub mod ppm;
pub mod ppp;
pub mod preq;
