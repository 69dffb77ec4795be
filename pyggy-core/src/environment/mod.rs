pub mod builtins;
pub mod environment;
pub mod io;
pub mod value;

pub mod prelude {
    pub use super::{
        builtins::*,
        environment::*,
        io::*,
        value::*
    };
}

#[cfg(test)]
mod tests;
