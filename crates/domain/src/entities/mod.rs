//! Domain entities - Objects with identity and lifecycle

mod speech_request;

pub use speech_request::SpeechRequest;
