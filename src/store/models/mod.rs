pub mod blog;
pub mod category;
pub mod user;

pub use blog::{Blog, BlogPatch, NewBlog};
pub use category::{Category, NewCategory};
pub use user::{NewUser, User};
