pub mod blog_filter;
pub mod error;
pub mod page;

pub use blog_filter::BlogFilter;
pub use error::FilterError;
pub use page::Page;
