// Genre canonicalization: the closed category set, fixed-order genre
// vectors, and the vectorizer that turns raw tag counts into them.

pub mod categories;
pub mod vector;
pub mod vectorizer;

pub use categories::CategorySet;
pub use vector::GenreVector;
