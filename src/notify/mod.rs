pub mod click;
pub mod decode;
pub mod models;
pub use click::*;
pub use decode::*;
pub use models::*;
