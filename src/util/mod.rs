pub mod channel_name;
pub mod parse;
