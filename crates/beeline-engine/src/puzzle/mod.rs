pub mod hints;
pub mod machine;
pub mod rank;
pub mod session;
pub mod source;
