pub mod courier;
pub mod order;
pub mod review;
pub mod trust;
