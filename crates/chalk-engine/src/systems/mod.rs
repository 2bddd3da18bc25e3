pub mod effects;
#[cfg(feature = "vectors")]
pub mod ink;
pub mod widgets;
