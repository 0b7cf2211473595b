pub mod platforms;
pub mod publish;
