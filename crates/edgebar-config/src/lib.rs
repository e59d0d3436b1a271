pub mod error;
pub mod module_kind;
pub mod normalize;
pub mod panel;
pub use error::*;
pub use module_kind::*;
pub use panel::*;
