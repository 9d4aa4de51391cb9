pub mod auth;
pub mod health;
pub mod history;
pub mod images;
pub mod inquiries;
pub mod press;
pub mod products;
pub mod seo;
pub mod sessions;
pub mod settings;
pub mod stories;
pub mod tags;
pub mod upload;
