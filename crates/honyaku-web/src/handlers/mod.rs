pub mod download;
pub mod glossary;
pub mod health;
pub mod pdf;
pub mod quality;
pub mod translate;
