pub mod diagnostic;
pub mod source;
pub mod src_span;
pub mod error;
pub mod warning;

pub mod prelude {
    pub use super::{
        diagnostic::*,
        source::*,
        src_span::*,
        error::*,
        warning::*
    };
}
