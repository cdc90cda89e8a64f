// src/ui/mod.rs
mod form;
mod popup;
mod render;
mod styles;

pub use render::render_all;
