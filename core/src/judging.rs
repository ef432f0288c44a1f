pub mod comparator;
pub mod compiler;
pub mod scorer;
pub mod supervisor;
pub mod testcase;
pub mod verdict;

pub use comparator::*;
pub use compiler::*;
pub use scorer::*;
pub use supervisor::*;
pub use testcase::*;
pub use verdict::*;
