//! Text preprocessing: tokenization, stopword filtering, Persian letterform
//! normalization, RTL reshaping and frequency counting

pub mod frequency;
pub mod normalize;
pub mod pipeline;
pub mod reshape;
pub mod stopwords;
pub mod tokenizer;

pub use frequency::Frequencies;
pub use pipeline::TextPipeline;
pub use stopwords::{add_stop_words, StopwordSet};
