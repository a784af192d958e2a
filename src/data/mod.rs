// Data model: the rows that enter the pipeline and the records it emits.

pub mod models;
