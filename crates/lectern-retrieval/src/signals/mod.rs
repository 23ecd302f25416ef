pub mod lexical;
pub mod semantic;

pub use lexical::{LexicalRetriever, LEXICAL_SIGNAL};
pub use semantic::{SemanticRetriever, SEMANTIC_SIGNAL};
