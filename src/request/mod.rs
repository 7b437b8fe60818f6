mod builder;
mod payload;

pub use builder::RequestBuilder;
pub use payload::RequestPayload;
