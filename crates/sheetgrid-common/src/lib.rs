pub mod key;
pub mod style;
pub mod value;

pub use key::*;
pub use style::*;
pub use value::*;
