pub mod embedding;
pub mod retriever;

pub use embedding::IEmbeddingProvider;
pub use retriever::IRetriever;
