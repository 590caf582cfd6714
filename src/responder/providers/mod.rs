pub mod echo;

pub use echo::EchoResponder;
