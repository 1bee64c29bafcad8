pub mod case;
pub mod dict;
pub mod env;
