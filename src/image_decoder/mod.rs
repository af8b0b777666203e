pub mod impl_fake;
pub mod impl_jpeg;
pub mod interface;
