pub mod netting;
pub mod resolver;
