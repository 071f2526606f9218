pub mod decode;
pub mod describe;
pub mod echo;
