pub mod hashed_tfidf;

pub use hashed_tfidf::HashedTfIdf;
