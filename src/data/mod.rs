pub mod budget;
pub mod format;
pub mod model;

pub use budget::{compare, Comparison, LookupError};
pub use format::{group_thousands, to_abbreviated_word, truncate_string};
#[allow(unused_imports)]
pub use model::{Alternative, City, DataLink, Dataset, DatasetError};
