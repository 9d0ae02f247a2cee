mod request;
mod youtube;

pub use request::RequestFetcher;
pub use youtube::TranscriptFetcher;
